//! Shared GPU types and helpers used by the render strategies.

use anyhow::Result;
use bytemuck::{Pod, Zeroable};

use crate::coords::Mat4;

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight-alpha blending, matching the atlas's non-premultiplied pixels.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── camera uniform ────────────────────────────────────────────────────────

/// Per-frame camera matrix, written unconditionally before every draw.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CameraUniform {
    pub view_proj: Mat4,
}

/// Minimum binding size for a uniform of type `T`.
///
/// All uniform structs here are non-empty `Pod` types, so the size is never
/// zero by construction.
pub(super) fn ubo_min_size<T: Pod>() -> std::num::NonZeroU64 {
    std::num::NonZeroU64::new(std::mem::size_of::<T>() as u64)
        .expect("uniform struct has non-zero size by construction")
}

// ── shader/pipeline validation ────────────────────────────────────────────

/// Runs `build` under a wgpu validation error scope and fails if the device
/// rejected anything created inside (shader module, pipeline, layout).
///
/// wgpu reports shader and pipeline errors asynchronously through error
/// scopes rather than return values; capturing them here is what lets a
/// strategy refuse to enter `Ready` on a broken shader.
pub(super) fn build_validated<T>(
    device: &wgpu::Device,
    what: &str,
    build: impl FnOnce() -> T,
) -> Result<T> {
    // Dropping the guard would pop the scope unchecked; hold it until the
    // explicit pop so the error is observed.
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = build();
    if let Some(err) = pollster::block_on(scope.pop()) {
        anyhow::bail!("{what} failed GPU validation: {err}");
    }
    Ok(value)
}
