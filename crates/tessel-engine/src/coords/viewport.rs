/// Drawable surface size in physical pixels.
///
/// A viewport can legitimately be 0×0 while the window is minimized; callers
/// must check [`Viewport::is_valid`] and skip the frame rather than divide by
/// the extent.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}
