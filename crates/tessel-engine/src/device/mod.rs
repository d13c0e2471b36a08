//! GPU device + surface management.
//!
//! Owns the wgpu instance/adapter/device/queue, configures the window
//! surface, and hands out per-frame encoders and views.

mod gpu;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
