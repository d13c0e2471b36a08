//! Camera state and the view-projection transform.
//!
//! The transform is pure: center and viewport come in as parameters every
//! frame instead of living as ambient mutable state, and the matrix is
//! recomputed unconditionally (cheap, and immune to staleness).

mod transform;

pub use transform::{Camera, DRAG_SENSITIVITY, TILE_SIZE, view_projection};
