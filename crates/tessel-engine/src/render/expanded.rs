use std::rc::Rc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Mat4;
use crate::geometry::pack_tile_ids;
use crate::map::TileGrid;

use super::atlas_texture::AtlasTexture;
use super::common::{build_validated, straight_alpha_blend, ubo_min_size};
use super::ctx::{RenderCtx, RenderTarget};
use super::strategy::{Phase, TileRenderer};

/// Per-frame shader parameters for the expansion stage: camera matrix plus
/// the grid dimensions the shader needs to place each instance.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SceneUniform {
    view_proj: Mat4,
    map_size: [u32; 2],
    _pad: [u32; 2], // 16-byte alignment
}

/// GPU-expansion strategy.
///
/// Uploads exactly one byte per tile (the id, packed 4 per `u32` word) as a
/// read-only storage buffer and never touches it again. Each frame draws
/// `tile_count` instances of 6 vertices with no vertex buffer; the vertex
/// shader derives cell, corner, and atlas rectangle from the instance and
/// vertex indices, reproducing the CPU builder's quads.
///
/// 1 byte/tile vs. the buffered strategy's 64 — the trade is shader-side
/// complexity for producer-side memory.
#[derive(Default)]
pub struct ExpandedRenderer {
    phase: Phase,
    state: Option<ReadyState>,
}

struct ReadyState {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    scene_ubo: wgpu::Buffer,
    map_size: [u32; 2],
    tile_count: u32,
}

impl ExpandedRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileRenderer for ExpandedRenderer {
    fn name(&self) -> &'static str {
        "expanded"
    }

    fn initialize(
        &mut self,
        ctx: &RenderCtx<'_>,
        grid: Rc<TileGrid>,
        atlas: &AtlasTexture,
    ) -> Result<()> {
        self.phase.expect(Phase::Uninitialized, self.name(), "initialize")?;

        let (pipeline, bgl) = build_validated(ctx.device, "tile expansion pipeline", || {
            let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("tessel expand shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/tile_expand.wgsl").into()),
            });

            let bgl = ctx
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("tessel expand bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: Some(ubo_min_size::<SceneUniform>()),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 1,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Storage { read_only: true },
                                has_dynamic_offset: false,
                                min_binding_size: None,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 2,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                                view_dimension: wgpu::TextureViewDimension::D2,
                                multisampled: false,
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: 3,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

            let layout = ctx
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("tessel expand pipeline layout"),
                    bind_group_layouts: &[&bgl],
                    immediate_size: 0,
                });

            let pipeline = ctx
                .device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("tessel expand pipeline"),
                    layout: Some(&layout),
                    vertex: wgpu::VertexState {
                        module: &shader,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[], // everything comes from builtin indices
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &shader,
                        entry_point: Some("fs_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format: ctx.surface_format,
                            blend: Some(straight_alpha_blend()),
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                });

            (pipeline, bgl)
        })
        .context("expanded strategy initialization")?;

        let packed = pack_tile_ids(&grid);
        let id_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tessel expand tile ids"),
                contents: bytemuck::cast_slice(&packed),
                usage: wgpu::BufferUsages::STORAGE,
            });

        let scene_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessel expand scene ubo"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tessel expand bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: id_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&atlas.sampler),
                },
            ],
        });

        log::info!(
            "expanded strategy ready: {} tile ids uploaded in {} words",
            grid.tile_count(),
            packed.len()
        );

        self.state = Some(ReadyState {
            pipeline,
            bind_group,
            scene_ubo,
            map_size: [grid.width(), grid.height()],
            tile_count: grid.tile_count() as u32,
        });
        self.phase = Phase::Ready;
        Ok(())
    }

    fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view_proj: Mat4,
    ) -> Result<()> {
        self.phase.expect(Phase::Ready, self.name(), "render")?;
        let Some(state) = self.state.as_ref() else {
            anyhow::bail!("expanded: no GPU state despite Ready phase");
        };

        ctx.queue.write_buffer(
            &state.scene_ubo,
            0,
            bytemuck::bytes_of(&SceneUniform {
                view_proj,
                map_size: state.map_size,
                _pad: [0; 2],
            }),
        );

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessel expand pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&state.pipeline);
        rpass.set_bind_group(0, &state.bind_group, &[]);
        rpass.draw(0..6, 0..state.tile_count);

        Ok(())
    }

    fn release(&mut self) {
        self.state = None;
        self.phase = Phase::Released;
    }
}
