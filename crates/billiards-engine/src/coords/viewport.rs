use glam::Vec2;

/// Drawable canvas size in logical pixels.
///
/// Pointer coordinates from the input subsystem use the same units, so the
/// two can be combined without a scale factor.
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

    /// Width over height; `1.0` for an invalid (e.g. minimized) viewport.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() { self.width / self.height } else { 1.0 }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}
