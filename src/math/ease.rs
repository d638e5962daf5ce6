//! Easing curves for animated transitions.

/// Cubic in-out easing on `t ∈ [0, 1]` (input is clamped).
pub fn cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_hits_endpoints_and_midpoint() {
        assert_eq!(cubic_in_out(0.0), 0.0);
        assert_eq!(cubic_in_out(1.0), 1.0);
        assert!((cubic_in_out(0.5) - 0.5).abs() < 1e-12);
        assert_eq!(cubic_in_out(-3.0), 0.0);
        assert_eq!(cubic_in_out(7.0), 1.0);
    }

    #[test]
    fn cubic_is_monotone() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = cubic_in_out(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
