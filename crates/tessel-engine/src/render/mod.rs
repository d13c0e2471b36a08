//! GPU rendering subsystem.
//!
//! Three interchangeable strategies draw the same tile grid; they differ in
//! how tile geometry and identity reach the pipeline. Each strategy owns its
//! GPU resources (pipeline, buffers) for its `Ready` lifetime.
//!
//! Convention:
//! - CPU geometry is in grid-cell units; the camera matrix (uniform) maps it
//!   to clip space, and the shaders flip clip-space Y for the +Y-down map.

mod atlas_texture;
mod buffered;
mod common;
mod ctx;
mod expanded;
mod immediate;
mod strategy;
mod tile_pipeline;

pub use atlas_texture::{AtlasImage, AtlasTexture};
pub use buffered::BufferedRenderer;
pub use ctx::{RenderCtx, RenderTarget};
pub use expanded::ExpandedRenderer;
pub use immediate::ImmediateRenderer;
pub use strategy::{StrategyKind, TileRenderer, create_renderer};
