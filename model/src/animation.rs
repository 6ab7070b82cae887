/// Cubic ease-in-out curve over `t` in `0.0..=1.0`. Inputs outside are clamped.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let p = -2.0 * t + 2.0;
        1.0 - p * p * p / 2.0
    }
}

/// A time based interpolation of a gauge angle.
///
/// Nothing is scheduled: the renderer samples the transition at the current time and
/// gets the eased angle back. A finished transition keeps returning its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleTransition {
    from: f64,
    to: f64,
    start: i64,
    duration_ms: i64,
}

impl AngleTransition {
    pub const DEFAULT_DURATION_MS: i64 = 500;

    pub fn new(from: f64, to: f64, start: i64, duration_ms: i64) -> Self {
        Self {
            from,
            to,
            start,
            duration_ms,
        }
    }

    /// A transition that already rests at `angle`.
    pub fn settled(angle: f64) -> Self {
        Self::new(angle, angle, 0, 0)
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self, now: i64) -> bool {
        now >= self.start + self.duration_ms
    }

    pub fn sample(&self, now: i64) -> f64 {
        if self.duration_ms <= 0 || self.is_finished(now) {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = (now - self.start) as f64 / self.duration_ms as f64;
        self.from + (self.to - self.from) * ease_in_out_cubic(t)
    }
}

impl Default for AngleTransition {
    fn default() -> Self {
        Self::settled(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_is_symmetric() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.25) + ease_in_out_cubic(0.75) - 1.0).abs() < 1e-12);
        assert!(ease_in_out_cubic(0.1) < 0.1);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
    }

    #[test]
    fn transition_samples() {
        let transition = AngleTransition::new(0.0, 180.0, 1_000, 500);

        assert_eq!(transition.sample(0), 0.0);
        assert_eq!(transition.sample(1_000), 0.0);
        assert_eq!(transition.sample(1_250), 90.0);
        assert_eq!(transition.sample(1_500), 180.0);
        assert_eq!(transition.sample(9_999), 180.0);
        assert!(!transition.is_finished(1_499));
        assert!(transition.is_finished(1_500));
    }

    #[test]
    fn settled_transition_is_constant() {
        let transition = AngleTransition::settled(360.0);

        assert_eq!(transition.sample(-5), 360.0);
        assert_eq!(transition.sample(5), 360.0);
        assert_eq!(transition.target(), 360.0);
    }
}
