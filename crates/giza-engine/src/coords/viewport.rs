/// Drawable size in physical pixels.
///
/// The renderer uses this only for the projection aspect ratio.
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

    /// Width over height; falls back to 1.0 for degenerate sizes so the
    /// projection stays invertible while a window is minimized.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_valid() {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_of_valid_viewport() {
        assert_eq!(Viewport::new(1920.0, 1080.0).aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn degenerate_viewport_falls_back_to_square() {
        assert_eq!(Viewport::new(0.0, 720.0).aspect(), 1.0);
        assert_eq!(Viewport::new(1280.0, 0.0).aspect(), 1.0);
    }
}
