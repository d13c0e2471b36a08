//! Tile map data model.
//!
//! [`TileGrid`] is pure data: a 2D grid of 8-bit tile-type ids. The id
//! doubles as an index into the 16×16 texture atlas via [`tile_uv_rect`].

mod atlas;
mod grid;

pub use atlas::{AtlasRect, CELL_UV, PAD_UV, tile_uv_rect};
pub use grid::{GridError, TileGrid};
