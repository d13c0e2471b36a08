use std::rc::Rc;

use anyhow::{Context, Result};

use crate::coords::Mat4;
use crate::geometry::{TileVertex, build_unindexed};
use crate::map::TileGrid;

use super::atlas_texture::AtlasTexture;
use super::ctx::{RenderCtx, RenderTarget};
use super::strategy::{Phase, TileRenderer};
use super::tile_pipeline::TilePipeline;

/// Immediate-emission strategy.
///
/// Keeps no persistent geometry: every frame, all 6 vertices per tile are
/// re-derived from the grid on the CPU and re-uploaded before a non-indexed
/// draw. O(tile count) CPU work per frame — fine for modest grids and as the
/// reference the buffered strategies are checked against.
#[derive(Default)]
pub struct ImmediateRenderer {
    phase: Phase,
    state: Option<ReadyState>,
}

struct ReadyState {
    grid: Rc<TileGrid>,
    pipeline: TilePipeline,
    vbo: wgpu::Buffer,
    vbo_capacity: usize,
}

impl ImmediateRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReadyState {
    /// Grow-only vertex buffer; for a fixed grid the first frame allocates
    /// the final size.
    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vbo_capacity {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessel immediate vbo"),
            size: (new_cap * std::mem::size_of::<TileVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.vbo_capacity = new_cap;
    }
}

impl TileRenderer for ImmediateRenderer {
    fn name(&self) -> &'static str {
        "immediate"
    }

    fn initialize(
        &mut self,
        ctx: &RenderCtx<'_>,
        grid: Rc<TileGrid>,
        atlas: &AtlasTexture,
    ) -> Result<()> {
        self.phase.expect(Phase::Uninitialized, self.name(), "initialize")?;

        let pipeline = TilePipeline::create(ctx, atlas, "tessel immediate pipeline")
            .context("immediate strategy initialization")?;

        let vertex_count = 6 * grid.tile_count();
        let vbo_capacity = vertex_count.next_power_of_two().max(64);
        let vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessel immediate vbo"),
            size: (vbo_capacity * std::mem::size_of::<TileVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        log::info!("immediate strategy ready: {vertex_count} vertices re-emitted per frame");

        self.state = Some(ReadyState {
            grid,
            pipeline,
            vbo,
            vbo_capacity,
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
        let Some(state) = self.state.as_mut() else {
            anyhow::bail!("immediate: no GPU state despite Ready phase");
        };

        let grid = Rc::clone(&state.grid);
        let vertices = build_unindexed(&grid);

        state.ensure_vertex_capacity(ctx, vertices.len());
        ctx.queue
            .write_buffer(&state.vbo, 0, bytemuck::cast_slice(&vertices));
        state.pipeline.write_camera(ctx.queue, view_proj);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tessel immediate pass"),
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
        rpass.draw(0..vertices.len() as u32, 0..1);

        Ok(())
    }

    fn release(&mut self) {
        self.state = None;
        self.phase = Phase::Released;
    }
}
