//! Linear scales: value space -> pixel space.
//!
//! A scale is a pure mapping `domain -> range`. It is never mutated after
//! construction; changing the plotted field builds a new scale from the
//! dataset.
//!
//! Tick generation follows the usual "nice step" rule: the raw step
//! `span / count` is rounded to `1`, `2`, `5` or `10` times a power of ten.

use serde::Serialize;

/// A linear map from a numeric domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: [f64; 2],
    pub range: [f64; 2],
}

impl LinearScale {
    pub fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Map a domain value to the range.
    ///
    /// A degenerate domain (zero span) maps everything to the range midpoint.
    pub fn apply(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Map a range value back to the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        let span = r1 - r0;
        if span == 0.0 || !span.is_finite() {
            return (d0 + d1) / 2.0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }

    /// Roughly `count` evenly spaced "nice" values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain[0], self.domain[1], count)
    }
}

/// Min and max of the finite values, or `None` if there are none.
pub fn extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi, reverse) = if stop < start {
        (stop, start, true)
    } else {
        (start, stop, false)
    };

    let raw = (hi - lo) / count as f64;
    let power = raw.log10().floor();
    let error = raw / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    // Keep tick values exact for sub-unit steps by dividing by an integer increment.
    let mut ticks = Vec::new();
    if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let i0 = (lo * inc).ceil() as i64;
        let i1 = (hi * inc).floor() as i64;
        for i in i0..=i1 {
            ticks.push(i as f64 / inc);
        }
    } else {
        let step = factor * 10f64.powf(power);
        let i0 = (lo / step).ceil() as i64;
        let i1 = (hi / step).floor() as i64;
        for i in i0..=i1 {
            ticks.push(i as f64 * step);
        }
    }

    if reverse {
        ticks.reverse();
    }
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_maps_endpoints() {
        let s = LinearScale::new([10.0, 20.0], [0.0, 100.0]);
        assert_eq!(s.apply(10.0), 0.0);
        assert_eq!(s.apply(20.0), 100.0);
        assert_eq!(s.apply(15.0), 50.0);
    }

    #[test]
    fn inverted_range_decreases() {
        let s = LinearScale::new([0.0, 10.0], [380.0, 0.0]);
        assert!(s.apply(1.0) > s.apply(2.0));
        assert_eq!(s.apply(10.0), 0.0);
    }

    #[test]
    fn invert_round_trips() {
        let s = LinearScale::new([3.5, 27.0], [0.0, 610.0]);
        let px = s.apply(12.25);
        assert!((s.invert(px) - 12.25).abs() < 1e-9);
    }

    #[test]
    fn degenerate_domain_maps_to_midpoint() {
        let s = LinearScale::new([5.0, 5.0], [0.0, 100.0]);
        assert_eq!(s.apply(5.0), 50.0);
        assert!(s.apply(123.0).is_finite());
    }

    #[test]
    fn ticks_are_nice() {
        let s = LinearScale::new([0.0, 10.0], [0.0, 1.0]);
        assert_eq!(s.ticks(5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);

        let s = LinearScale::new([7.28, 25.44], [0.0, 1.0]);
        assert_eq!(s.ticks(5), vec![10.0, 15.0, 20.0, 25.0]);

        let s = LinearScale::new([0.0, 1.0], [0.0, 1.0]);
        assert_eq!(s.ticks(5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn extent_skips_non_finite() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.0]), Some((-1.0, 7.0)));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }
}
