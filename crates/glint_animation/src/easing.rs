//! Easing functions for animations

/// Named easing curve mapping normalized progress to normalized visual progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curve {
    #[default]
    Linear,
    /// Quadratic ease-in
    EaseIn,
    /// Quadratic ease-out
    EaseOut,
    /// Quadratic ease-in-out
    EaseInOut,
    /// Smoothstep, `t²(3 − 2t)`
    Bezier,
}

impl Curve {
    pub const ALL: [Curve; 5] = [
        Curve::Linear,
        Curve::EaseIn,
        Curve::EaseOut,
        Curve::EaseInOut,
        Curve::Bezier,
    ];

    /// Apply the curve to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
            Curve::EaseOut => t * (2.0 - t),
            Curve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Curve::Bezier => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Resolve a curve name such as `"ease-in-out"`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Curve::Linear),
            "ease-in" => Some(Curve::EaseIn),
            "ease-out" => Some(Curve::EaseOut),
            "ease-in-out" => Some(Curve::EaseInOut),
            "bezier" => Some(Curve::Bezier),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Curve::Linear => "linear",
            Curve::EaseIn => "ease-in",
            Curve::EaseOut => "ease-out",
            Curve::EaseInOut => "ease-in-out",
            Curve::Bezier => "bezier",
        }
    }
}

/// Apply a curve by name; unknown names behave as [`Curve::Linear`]
pub fn ease(name: &str, t: f32) -> f32 {
    Curve::from_name(name).unwrap_or_default().apply(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for curve in Curve::ALL {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?} at 0");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in Curve::ALL {
            let mut prev = curve.apply(0.0);
            for step in 1..=100 {
                let value = curve.apply(step as f32 / 100.0);
                assert!(value >= prev, "{curve:?} decreased at step {step}");
                prev = value;
            }
        }
    }

    #[test]
    fn midpoint_values() {
        assert_eq!(Curve::Linear.apply(0.5), 0.5);
        assert_eq!(Curve::EaseIn.apply(0.5), 0.25);
        assert_eq!(Curve::EaseOut.apply(0.5), 0.75);
        assert_eq!(Curve::EaseInOut.apply(0.5), 0.5);
        assert_eq!(Curve::EaseInOut.apply(0.25), 0.125);
        assert_eq!(Curve::Bezier.apply(0.5), 0.5);
    }

    #[test]
    fn ease_in_out_is_continuous_at_half() {
        let below = Curve::EaseInOut.apply(0.499_99);
        let above = Curve::EaseInOut.apply(0.5);
        assert!((above - below).abs() < 1e-3);
    }

    #[test]
    fn names_round_trip() {
        for curve in Curve::ALL {
            assert_eq!(Curve::from_name(curve.name()), Some(curve));
        }
        assert_eq!(Curve::from_name("spring"), None);
    }

    #[test]
    fn ease_by_name_falls_back_to_linear() {
        assert_eq!(ease("ease-in", 0.5), 0.25);
        assert_eq!(ease("wobble", 0.3), 0.3);
    }
}
