//! CPU-side tile geometry expansion.
//!
//! Turns a [`TileGrid`](crate::map::TileGrid) into vertex attribute data laid
//! out for GPU consumption. Pure and deterministic: no GPU interaction
//! happens here, so everything is unit-testable.
//!
//! Buffer layout (load-bearing for attribute binding, do not reorder):
//! - location 0: position, 2×f32, byte offset 0
//! - location 1: texcoord, 2×f32, byte offset 8
//! - stride 16 bytes

mod builder;
mod vertex;

pub use builder::{QUAD_INDEX_PATTERN, TileMesh, build_mesh, build_unindexed, pack_tile_ids};
pub use vertex::TileVertex;
