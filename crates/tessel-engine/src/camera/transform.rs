use crate::coords::{Mat4, Vec2, Viewport};

/// Edge length of one tile on screen, in pixels, at the default scale.
pub const TILE_SIZE: f32 = 32.0;

/// Pointer-drag to world-units multiplier.
pub const DRAG_SENSITIVITY: f32 = 1.25;

/// Camera state: the point of the map the view is centered on.
///
/// Mutated between frames by the input layer and read once per frame by
/// [`view_projection`]. Single-threaded by design; no locking.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Camera {
    pub center: Vec2,
}

impl Camera {
    /// Applies a raw pointer-drag delta to the center, scaled by
    /// [`DRAG_SENSITIVITY`]. Dragging right moves the camera right, so the
    /// visible world slides left.
    pub fn pan(&mut self, delta: Vec2) {
        self.center += delta * DRAG_SENSITIVITY;
    }
}

/// Composes the per-frame view-projection matrix.
///
/// Right-to-left: translate by `-center` (panning moves the world opposite
/// the camera), scale grid units to pixels by `tile_size`, scale pixels to
/// NDC by `2/viewport`.
///
/// Returns `None` when the viewport is degenerate (zero-sized surface while
/// minimized); the caller skips the frame instead of dividing by zero.
pub fn view_projection(center: Vec2, viewport: Viewport, tile_size: f32) -> Option<Mat4> {
    if !viewport.is_valid() {
        return None;
    }

    let ndc = Mat4::scale(2.0 / viewport.width, 2.0 / viewport.height);
    let tiles_to_px = Mat4::scale(tile_size, tile_size);
    let view = Mat4::translation(-center.x, -center.y);

    Some(ndc * tiles_to_px * view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6, "{a:?} != {b:?}");
    }

    #[test]
    fn grid_point_maps_to_expected_ndc() {
        let m = view_projection(Vec2::zero(), Viewport::new(640.0, 480.0), TILE_SIZE).unwrap();
        // (1,1) -> ×32 -> (32,32) -> ×(2/640, 2/480) -> (0.1, 2/15)
        assert_close(m.transform_point(Vec2::new(1.0, 1.0)), Vec2::new(0.1, 2.0 / 15.0));
    }

    #[test]
    fn panning_shifts_the_world_the_opposite_way() {
        let vp = Viewport::new(640.0, 480.0);
        let m = view_projection(Vec2::new(1.0, 0.0), vp, TILE_SIZE).unwrap();
        // Camera one tile right: the point at grid (1,1) lands where (0,1) was.
        let m0 = view_projection(Vec2::zero(), vp, TILE_SIZE).unwrap();
        assert_close(
            m.transform_point(Vec2::new(1.0, 1.0)),
            m0.transform_point(Vec2::new(0.0, 1.0)),
        );
    }

    #[test]
    fn degenerate_viewport_signals_skip_frame() {
        assert!(view_projection(Vec2::zero(), Viewport::new(0.0, 480.0), TILE_SIZE).is_none());
        assert!(view_projection(Vec2::zero(), Viewport::new(640.0, 0.0), TILE_SIZE).is_none());
        assert!(view_projection(Vec2::zero(), Viewport::new(f32::NAN, 480.0), TILE_SIZE).is_none());
    }

    #[test]
    fn recomputation_is_deterministic() {
        let vp = Viewport::new(1366.0, 768.0);
        let c = Vec2::new(12.5, -40.0);
        assert_eq!(
            view_projection(c, vp, TILE_SIZE),
            view_projection(c, vp, TILE_SIZE)
        );
    }

    #[test]
    fn drag_applies_sensitivity() {
        let mut cam = Camera::default();
        cam.pan(Vec2::new(4.0, -8.0));
        assert_eq!(cam.center, Vec2::new(5.0, -10.0));
    }
}
