//! Tessel engine crate.
//!
//! Renders a large 2D tile map from a texture atlas via wgpu. The library
//! owns the CPU-side core (grid, atlas mapping, geometry expansion, camera
//! transform) and three interchangeable GPU render strategies on top of it.

pub mod device;
pub mod input;
pub mod time;

pub mod camera;
pub mod coords;
pub mod geometry;
pub mod logging;
pub mod map;
pub mod render;
