//! Scales
//! Map data values onto pixel positions.

use serde::Serialize;

/// Continuous linear mapping from a data domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value. A degenerate domain maps everything to the
    /// middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

    /// Extend the domain outward to round tick boundaries.
    ///
    /// Repeats until the step settles, since widening the domain can change it.
    pub fn nice(mut self) -> Self {
        let mut previous = None;
        for _ in 0..10 {
            let (d0, d1) = self.domain;
            let step = nice_step(d1 - d0, 10);
            if !(step > 0.0 && step.is_finite()) || previous == Some(step) {
                break;
            }
            self.domain = ((d0 / step).floor() * step, (d1 / step).ceil() * step);
            previous = Some(step);
        }
        self
    }

    /// Roughly `count` evenly spaced round values inside the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        let step = nice_step(hi - lo, count);
        if step <= 0.0 || !step.is_finite() {
            return vec![lo];
        }

        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}

/// Round step (1, 2 or 5 times a power of ten) giving about `count` intervals.
pub fn nice_step(span: f64, count: usize) -> f64 {
    if span <= 0.0 || !span.is_finite() || count == 0 {
        return 0.0;
    }
    let raw = span / count as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual >= 50f64.sqrt() {
        10.0
    } else if residual >= 10f64.sqrt() {
        5.0
    } else if residual >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    nice * magnitude
}

/// Ordinal band scale: each category gets an equal-width band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandScale {
    domain: Vec<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` is applied both between bands and at the outer edges.
    pub fn new(domain: Vec<String>, range: (f64, f64), padding: f64) -> Self {
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n + padding).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) / 2.0;
        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of the band for `key`, or `None` if it is not in the domain.
    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .iter()
            .position(|k| k == key)
            .map(|i| self.start + self.step * i as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_endpoints_and_inverts() {
        let y = LinearScale::new((0.0, 10.0), (580.0, 20.0));
        assert_eq!(y.map(0.0), 580.0);
        assert_eq!(y.map(10.0), 20.0);
        assert_eq!(y.map(5.0), 300.0);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let x = LinearScale::new((3.0, 3.0), (0.0, 100.0));
        assert_eq!(x.map(3.0), 50.0);
    }

    #[test]
    fn nice_rounds_outward() {
        let s = LinearScale::new((0.0, 37.0), (0.0, 1.0)).nice();
        assert_eq!(s.domain, (0.0, 40.0));
        let s = LinearScale::new((0.0, 0.0), (0.0, 1.0)).nice();
        assert_eq!(s.domain, (0.0, 0.0));
    }

    #[test]
    fn nice_switches_steps_at_root_thresholds() {
        // raw step 3.3 is past sqrt(10), so the step is 5
        let s = LinearScale::new((0.0, 33.0), (0.0, 1.0)).nice();
        assert_eq!(s.domain, (0.0, 35.0));
        // raw step 1.45 is past sqrt(2), so the step is 2
        let s = LinearScale::new((0.0, 14.5), (0.0, 1.0)).nice();
        assert_eq!(s.domain, (0.0, 16.0));
        assert_eq!(nice_step(72.0, 10), 10.0);
    }

    #[test]
    fn ticks_are_round() {
        let s = LinearScale::new((0.0, 40.0), (0.0, 1.0));
        assert_eq!(s.ticks(4), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn band_positions_with_padding() {
        let keys = vec!["A".to_string(), "B".to_string()];
        let band = BandScale::new(keys, (0.0, 210.0), 0.1);
        // step = 210 / 2.1 = 100, bands start one padding step in
        let a = band.position("A").unwrap();
        let b = band.position("B").unwrap();
        assert!((a - 10.0).abs() < 1e-9);
        assert!((b - 110.0).abs() < 1e-9);
        assert!((band.bandwidth() - 90.0).abs() < 1e-9);
        assert!(band.position("C").is_none());
    }
}
