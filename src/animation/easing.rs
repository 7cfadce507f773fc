//! Easing functions for animation interpolation.
//!
//! Pure time-to-progress shaping: every curve maps [0, 1] onto [0, 1],
//! is monotonic non-decreasing, and hits the endpoints exactly.

/// Easing function variants for animation curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Cubic ease-out (fast start, slow settle). `1 - (1-t)^3`.
    #[default]
    CubicOut,
    /// Cubic ease-in-out (slow-fast-slow, symmetric).
    /// `t < 0.5 ? 4t^3 : 1 - (-2t+2)^3 / 2`.
    CubicInOut,
}

impl Easing {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0]. Returns the eased value, also in
    /// [0.0, 1.0], with `f(0) = 0` and `f(1) = 1` exactly.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::CubicOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt * omt
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_exact() {
        for f in [Easing::Linear, Easing::CubicOut, Easing::CubicInOut] {
            assert_eq!(f.evaluate(0.0), 0.0, "{f:?} must start at 0");
            assert_eq!(f.evaluate(1.0), 1.0, "{f:?} must end at 1");
        }
    }

    #[test]
    fn test_bounded_and_monotonic() {
        for f in [Easing::Linear, Easing::CubicOut, Easing::CubicInOut] {
            let mut prev = 0.0f32;
            for i in 0..=1000 {
                let t = i as f32 / 1000.0;
                let v = f.evaluate(t);
                assert!((0.0..=1.0).contains(&v), "{f:?} out of bounds at {t}");
                assert!(v >= prev, "{f:?} not monotonic at {t}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_cubic_out_shape() {
        // Fast start: value at t=0.25 is well ahead of linear.
        assert!(Easing::CubicOut.evaluate(0.25) > 0.25);
        // 1 - 0.5^3 = 0.875
        assert!((Easing::CubicOut.evaluate(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_in_out_shape() {
        // Slow start, symmetric midpoint.
        assert!(Easing::CubicInOut.evaluate(0.25) < 0.25);
        assert!((Easing::CubicInOut.evaluate(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::CubicInOut.evaluate(0.75) > 0.75);
        // 4 * 0.25^3 = 0.0625
        assert!((Easing::CubicInOut.evaluate(0.25) - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        for f in [Easing::Linear, Easing::CubicOut, Easing::CubicInOut] {
            assert_eq!(f.evaluate(-0.5), 0.0);
            assert_eq!(f.evaluate(1.5), 1.0);
        }
    }
}
