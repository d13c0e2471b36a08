use std::rc::Rc;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::coords::Mat4;
use crate::geometry::build_mesh;
use crate::map::TileGrid;

use super::atlas_texture::AtlasTexture;
use super::ctx::{RenderCtx, RenderTarget};
use super::strategy::{Phase, TileRenderer};
use super::tile_pipeline::TilePipeline;

/// Static-buffer strategy.
///
/// Expands the grid once at initialize (4 vertices + 6 indices per tile),
/// uploads both buffers to GPU-resident memory, and afterwards each frame is
/// a single indexed draw with a fresh camera matrix. The geometry never
/// changes after upload.
#[derive(Default)]
pub struct BufferedRenderer {
    phase: Phase,
    state: Option<ReadyState>,
}

struct ReadyState {
    pipeline: TilePipeline,
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
}

impl BufferedRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileRenderer for BufferedRenderer {
    fn name(&self) -> &'static str {
        "buffered"
    }

    fn initialize(
        &mut self,
        ctx: &RenderCtx<'_>,
        grid: Rc<TileGrid>,
        atlas: &AtlasTexture,
    ) -> Result<()> {
        self.phase.expect(Phase::Uninitialized, self.name(), "initialize")?;

        let pipeline = TilePipeline::create(ctx, atlas, "tessel buffered pipeline")
            .context("buffered strategy initialization")?;

        let mesh = build_mesh(&grid);

        let vbo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tessel buffered vbo"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let ibo = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("tessel buffered ibo"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        log::info!(
            "buffered strategy ready: {} vertices / {} indices uploaded once",
            mesh.vertices.len(),
            mesh.indices.len()
        );

        self.state = Some(ReadyState {
            pipeline,
            vbo,
            ibo,
            index_count: mesh.indices.len() as u32,
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
            anyhow::bail!("buffered: no GPU state despite Ready phase");
        };

        state.pipeline.write_camera(ctx.queue, view_proj);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessel buffered pass"),
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

        state.pipeline.bind(&mut rpass);
        rpass.set_vertex_buffer(0, state.vbo.slice(..));
        rpass.set_index_buffer(state.ibo.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..state.index_count, 0, 0..1);

        Ok(())
    }

    fn release(&mut self) {
        self.state = None;
        self.phase = Phase::Released;
    }
}
