//! Math and coordinate types shared across the engine.
//!
//! Conventions:
//! - Tile geometry is emitted in grid-cell units (one tile = one unit).
//! - The camera transform scales grid units to pixels and pixels to NDC.
//! - Screen origin is top-left, +X right, +Y down; the shaders flip clip-space
//!   Y to match.

mod mat4;
mod vec2;
mod viewport;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use viewport::Viewport;
