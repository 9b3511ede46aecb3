/// Default rotation advance per frame, in radians.
pub(crate) const DEFAULT_SPEED: f32 = 0.01;

/// Rotation state for the pyramid.
///
/// Field discipline (single writer per field):
/// - `angle` is written only by [`advance`], once per frame.
/// - `speed` and `rotating` are written only by the UI-facing setters.
///
/// `angle` grows monotonically while rotating and is never reduced modulo
/// 2π; trigonometric periodicity wraps it implicitly.
///
/// [`advance`]: AnimationState::advance
#[derive(Debug, Clone)]
pub struct AnimationState {
    angle: f32,
    speed: f32,
    rotating: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            speed: DEFAULT_SPEED,
            rotating: true,
        }
    }

    /// Advances the angle by one frame's worth of rotation and returns it.
    ///
    /// When paused this leaves the angle untouched, so toggling freezes at
    /// the exact angle reached and resumes from the same value.
    pub fn advance(&mut self) -> f32 {
        if self.rotating {
            self.angle += self.speed;
        }
        self.angle
    }

    /// Flips the pause toggle.
    pub fn toggle_rotating(&mut self) {
        self.rotating = !self.rotating;
    }

    /// Replaces the per-frame rotation speed.
    ///
    /// The value is not clamped: negative speeds reverse the rotation and
    /// large speeds simply spin faster.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_rotating(&self) -> bool {
        self.rotating
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn starts_rotating_at_default_speed() {
        let s = AnimationState::new();
        assert!(s.is_rotating());
        assert_eq!(s.speed(), DEFAULT_SPEED);
        assert_eq!(s.angle(), 0.0);
    }

    #[test]
    fn angle_accumulates_per_tick() {
        let mut s = AnimationState::new();
        for _ in 0..100 {
            s.advance();
        }
        assert_abs_diff_eq!(s.angle(), 0.01 * 100.0, epsilon = 1e-5);
    }

    #[test]
    fn paused_state_holds_angle_over_many_ticks() {
        let mut s = AnimationState::new();
        s.advance();
        s.advance();
        let frozen = s.angle();

        s.toggle_rotating();
        for _ in 0..1000 {
            assert_eq!(s.advance(), frozen);
        }
        assert_eq!(s.angle(), frozen);
    }

    #[test]
    fn resume_continues_from_frozen_angle() {
        let mut s = AnimationState::new();
        s.advance();
        let frozen = s.angle();

        s.toggle_rotating();
        s.advance();
        s.toggle_rotating();

        assert_abs_diff_eq!(s.advance(), frozen + DEFAULT_SPEED, epsilon = 1e-7);
    }

    // ── speed ─────────────────────────────────────────────────────────────

    #[test]
    fn negative_speed_reverses() {
        let mut s = AnimationState::new();
        s.set_speed(-0.25);
        s.advance();
        assert_abs_diff_eq!(s.angle(), -0.25, epsilon = 1e-7);
    }

    #[test]
    fn speed_is_not_clamped() {
        let mut s = AnimationState::new();
        s.set_speed(42.0);
        assert_eq!(s.speed(), 42.0);
        s.advance();
        assert_abs_diff_eq!(s.angle(), 42.0, epsilon = 1e-5);
    }
}
