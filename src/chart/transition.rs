//! Time-based animated values.
//!
//! Every animated coordinate is a single `Animated` value. Retargeting a value
//! while it is moving starts the new tween from wherever the old one had
//! reached at that instant, so overlapping transitions never jump and the most
//! recently issued target is always where the value comes to rest.

use std::time::{Duration, Instant};

use crate::math::{cubic_in_out, lerp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animated {
    from: f64,
    to: f64,
    start: Option<Instant>,
    duration: Duration,
}

impl Animated {
    /// A value at rest.
    pub fn resting(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            start: None,
            duration: Duration::ZERO,
        }
    }

    /// Final resting value (the last issued target).
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Eased value at `now`.
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(start) = self.start else {
            return self.to;
        };
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(start);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        lerp(self.from, self.to, cubic_in_out(t))
    }

    /// Start a tween from the current value towards `to`.
    pub fn retarget(&mut self, to: f64, now: Instant, duration: Duration) {
        let from = self.value_at(now);
        *self = Self {
            from,
            to,
            start: Some(now),
            duration,
        };
    }

    pub fn is_running(&self, now: Instant) -> bool {
        match self.start {
            Some(start) => now.saturating_duration_since(start) < self.duration,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn resting_value_never_moves() {
        let v = Animated::resting(4.0);
        let now = Instant::now();
        assert_eq!(v.value_at(now), 4.0);
        assert!(!v.is_running(now));
    }

    #[test]
    fn tween_runs_from_start_to_target() {
        let t0 = Instant::now();
        let mut v = Animated::resting(0.0);
        v.retarget(100.0, t0, SECOND);

        assert_eq!(v.value_at(t0), 0.0);
        assert!((v.value_at(t0 + SECOND / 2) - 50.0).abs() < 1e-9);
        assert_eq!(v.value_at(t0 + SECOND), 100.0);
        assert!(v.is_running(t0 + SECOND / 2));
        assert!(!v.is_running(t0 + SECOND));
    }

    #[test]
    fn retarget_mid_flight_starts_from_current_value_and_last_target_wins() {
        let t0 = Instant::now();
        let mut v = Animated::resting(0.0);
        v.retarget(100.0, t0, SECOND);

        let mid = t0 + SECOND / 2;
        let reached = v.value_at(mid);
        v.retarget(-20.0, mid, SECOND);

        assert_eq!(v.value_at(mid), reached);
        assert_eq!(v.target(), -20.0);
        assert_eq!(v.value_at(mid + SECOND), -20.0);
    }

    #[test]
    fn zero_duration_jumps() {
        let t0 = Instant::now();
        let mut v = Animated::resting(1.0);
        v.retarget(9.0, t0, Duration::ZERO);
        assert_eq!(v.value_at(t0), 9.0);
        assert!(!v.is_running(t0));
    }
}
