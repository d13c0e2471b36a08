use std::rc::Rc;

use anyhow::Result;

use crate::coords::Mat4;
use crate::map::TileGrid;

use super::atlas_texture::AtlasTexture;
use super::ctx::{RenderCtx, RenderTarget};
use super::{BufferedRenderer, ExpandedRenderer, ImmediateRenderer};

/// Lifecycle of a strategy instance. One-way:
/// `Uninitialized -> Ready -> Released`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub(super) enum Phase {
    #[default]
    Uninitialized,
    Ready,
    Released,
}

impl Phase {
    /// Checked state-machine guard: calling an operation in the wrong phase
    /// is a programming error, reported instead of silently ignored.
    pub(super) fn expect(self, want: Phase, who: &str, op: &str) -> Result<()> {
        anyhow::ensure!(self == want, "{who}: {op} called in {self:?} state");
        Ok(())
    }
}

/// A tile-map render strategy.
///
/// All strategies draw the same grid through the same camera; they differ in
/// where tile geometry is expanded (CPU per frame, CPU once, or GPU per
/// frame) and what is uploaded (full vertices vs. one byte per tile).
///
/// Single-threaded: the graphics context is thread-affine and at most one
/// strategy is active in it at a time.
pub trait TileRenderer {
    fn name(&self) -> &'static str;

    /// Builds pipelines and uploads whatever the strategy keeps GPU-side.
    ///
    /// A shader/pipeline build failure is fatal to this instance: it stays
    /// out of `Ready` and must not be used. There is no partial upload —
    /// either everything is created or the phase does not advance.
    fn initialize(
        &mut self,
        ctx: &RenderCtx<'_>,
        grid: Rc<TileGrid>,
        atlas: &AtlasTexture,
    ) -> Result<()>;

    /// Issues this frame's draw call with the current camera matrix.
    ///
    /// The caller computes `view_proj` per frame (and skips the frame
    /// entirely on a degenerate viewport, so this is never reached with a
    /// broken matrix).
    fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        view_proj: Mat4,
    ) -> Result<()>;

    /// Drops all GPU resources. Idempotent; the instance is terminal
    /// afterwards and `render` becomes a checked failure.
    fn release(&mut self);
}

/// Strategy selection, fixed at startup (no mid-session switching).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StrategyKind {
    /// Re-derive and re-upload every vertex each frame. Baseline.
    Immediate,
    /// Build and upload the full mesh once; indexed draw per frame.
    Buffered,
    /// Upload one byte per tile once; expand quads in the vertex shader.
    Expanded,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            StrategyKind::Immediate => "immediate",
            StrategyKind::Buffered => "buffered",
            StrategyKind::Expanded => "expanded",
        }
    }
}

/// Creates a fresh, uninitialized renderer for the given strategy.
pub fn create_renderer(kind: StrategyKind) -> Box<dyn TileRenderer> {
    match kind {
        StrategyKind::Immediate => Box::new(ImmediateRenderer::new()),
        StrategyKind::Buffered => Box::new(BufferedRenderer::new()),
        StrategyKind::Expanded => Box::new(ExpandedRenderer::new()),
    }
}
