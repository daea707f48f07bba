/// Duration of an axis domain change, in seconds.
pub const AXIS_DURATION: f64 = 0.1;
/// Duration of circle and label moves, in seconds.
pub const MARK_DURATION: f64 = 1.0;

/// Cubic ease-in-out on `t` in `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Interpolation between two values over a time window.
///
/// Times are seconds on the same clock the UI uses for `now`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
}

impl Transition {
    pub fn new(from: f64, to: f64, start: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    pub fn value_at(&self, now: f64) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }
        if now <= self.start {
            return self.from;
        }
        let t = ease_cubic_in_out((now - self.start) / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.duration <= 0.0 || now >= self.start + self.duration
    }
}

/// A value that can be moved to a new target over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated {
    transition: Transition,
}

impl Animated {
    /// A value at rest.
    pub fn still(value: f64) -> Self {
        Self {
            transition: Transition::new(value, value, 0.0, 0.0),
        }
    }

    pub fn value_at(&self, now: f64) -> f64 {
        self.transition.value_at(now)
    }

    /// Start moving towards `to`, beginning at wherever the value is at `now`.
    pub fn retarget(&mut self, to: f64, now: f64, duration: f64) {
        let from = self.value_at(now);
        self.transition = Transition::new(from, to, now, duration);
    }

    pub fn is_animating(&self, now: f64) -> bool {
        !self.transition.is_finished(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
        assert_eq!(ease_cubic_in_out(-3.0), 0.0);
        assert_eq!(ease_cubic_in_out(7.0), 1.0);
        assert!(ease_cubic_in_out(0.25) < 0.25);
        assert!(ease_cubic_in_out(0.75) > 0.75);
    }

    #[test]
    fn test_transition_hits_endpoints() {
        let transition = Transition::new(10.0, 20.0, 5.0, 1.0);
        assert_eq!(transition.value_at(4.0), 10.0);
        assert_eq!(transition.value_at(5.0), 10.0);
        assert_eq!(transition.value_at(5.5), 15.0);
        assert_eq!(transition.value_at(6.0), 20.0);
        assert_eq!(transition.value_at(100.0), 20.0);
        assert!(!transition.is_finished(5.9));
        assert!(transition.is_finished(6.0));
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut value = Animated::still(0.0);
        assert!(!value.is_animating(0.0));

        value.retarget(100.0, 1.0, MARK_DURATION);
        assert!(value.is_animating(1.2));
        let midway = value.value_at(1.5);
        assert_eq!(midway, 50.0);

        value.retarget(0.0, 1.5, MARK_DURATION);
        assert_eq!(value.value_at(1.5), midway);
        assert_eq!(value.value_at(2.5), 0.0);
        assert!(!value.is_animating(2.5));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut value = Animated::still(3.0);
        value.retarget(9.0, 2.0, 0.0);
        assert_eq!(value.value_at(2.0), 9.0);
        assert!(!value.is_animating(2.0));
    }
}
