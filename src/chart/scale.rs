//! Linear data→pixel scales with padded, niced domains
//!
//! Built from the combined axis statistics: the domain is the data extent
//! expanded by a symmetric padding fraction, then rounded outward to a
//! "nice" 1/2/5×10^k tick step. The y axis inverts by passing a descending
//! pixel range (pixel origin is top-left).

/// Linear mapping from a data domain to a pixel range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
    step: f64,
}

impl LinearScale {
    /// Build a scale over `[min, max]` with `extent = max - min`.
    ///
    /// `padding` is the fraction of the extent added across both ends
    /// (half per side; 0 disables padding). A zero-extent domain (one
    /// distinct value, or no points at all) is widened by ±1 around the
    /// value so the mapping never divides by zero.
    pub fn fitted(min: f64, max: f64, extent: f64, padding: f64, range: (f32, f32)) -> Self {
        let (mut lo, mut hi) = if extent > 0.0 {
            (min - extent * padding / 2.0, max + extent * padding / 2.0)
        } else {
            (min - 1.0, max + 1.0)
        };

        let step = nice_step((hi - lo) / crate::constants::chart::TARGET_TICKS as f64);
        lo = (lo / step).floor() * step;
        hi = (hi / step).ceil() * step;

        Self {
            domain: (lo, hi),
            range,
            step,
        }
    }

    /// Map a data value to a pixel coordinate
    pub fn apply(&self, value: f64) -> f32 {
        let (d0, d1) = self.domain;
        let t = (value - d0) / (d1 - d0);
        self.range.0 + t as f32 * (self.range.1 - self.range.0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Tick positions covering the domain at the nice step
    pub fn ticks(&self) -> Vec<f64> {
        let (lo, hi) = self.domain;
        let mut ticks = Vec::new();
        let mut i = 0i64;
        loop {
            let v = lo + i as f64 * self.step;
            if v > hi + self.step * 1e-6 || ticks.len() > 256 {
                break;
            }
            ticks.push(v);
            i += 1;
        }
        ticks
    }

    /// Format a tick label, trimming float noise at the nice step's
    /// precision
    pub fn format_tick(&self, value: f64) -> String {
        let decimals = if self.step >= 1.0 {
            0
        } else {
            (-self.step.log10().floor()) as usize
        };
        format!("{value:.decimals$}")
    }
}

/// Round a rough step up to the nearest 1, 2, or 5 times a power of ten
fn nice_step(rough: f64) -> f64 {
    let magnitude = 10.0f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;

    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    factor * magnitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step_ladder() {
        assert_eq!(nice_step(1.4), 2.0);
        assert_eq!(nice_step(3.0), 5.0);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(40.0), 50.0);
        assert!((nice_step(0.9) - 1.0).abs() < 1e-12);
        assert!((nice_step(0.03) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_domain_niced_outward() {
        let scale = LinearScale::fitted(3.0, 97.0, 94.0, 0.0, (0.0, 100.0));
        let (lo, hi) = scale.domain();
        // endpoints land on the tick step and enclose the data
        assert!(lo <= 3.0 && hi >= 97.0);
        let ticks = scale.ticks();
        let step = ticks[1] - ticks[0];
        let offset = lo / step - (lo / step).round();
        assert!(offset.abs() < 1e-9);
    }

    #[test]
    fn test_apply_maps_domain_to_range() {
        let scale = LinearScale::fitted(0.0, 100.0, 100.0, 0.0, (40.0, 240.0));
        let (lo, hi) = scale.domain();
        assert!((scale.apply(lo) - 40.0).abs() < 1e-3);
        assert!((scale.apply(hi) - 240.0).abs() < 1e-3);
        let mid = scale.apply((lo + hi) / 2.0);
        assert!((mid - 140.0).abs() < 1e-3);
    }

    #[test]
    fn test_inverted_range_for_y() {
        // pixel origin is top-left: larger data values map to smaller y
        let scale = LinearScale::fitted(0.0, 10.0, 10.0, 0.0, (200.0, 40.0));
        let (lo, hi) = scale.domain();
        assert!(scale.apply(hi) < scale.apply(lo));
    }

    #[test]
    fn test_padding_expands_domain() {
        let tight = LinearScale::fitted(0.0, 100.0, 100.0, 0.0, (0.0, 1.0));
        let padded = LinearScale::fitted(0.0, 100.0, 100.0, 0.1, (0.0, 1.0));
        assert!(padded.domain().0 <= tight.domain().0);
        assert!(padded.domain().1 >= tight.domain().1);
        // 5% of the extent on each side
        assert!(padded.domain().0 <= -5.0 + 1e-9);
        assert!(padded.domain().1 >= 105.0 - 1e-9);
    }

    #[test]
    fn test_zero_extent_never_divides_by_zero() {
        let scale = LinearScale::fitted(5.0, 5.0, 0.0, 0.1, (0.0, 100.0));
        let px = scale.apply(5.0);
        assert!(px.is_finite());
        // the lone value sits inside the widened domain
        let (lo, hi) = scale.domain();
        assert!(lo < 5.0 && 5.0 < hi);

        // the all-zero statistics of an empty point set are also safe
        let empty = LinearScale::fitted(0.0, 0.0, 0.0, 0.1, (0.0, 100.0));
        assert!(empty.apply(0.0).is_finite());
    }

    #[test]
    fn test_ticks_cover_domain() {
        let scale = LinearScale::fitted(0.0, 100.0, 100.0, 0.1, (0.0, 1.0));
        let ticks = scale.ticks();
        assert!(ticks.len() >= 2);
        let (lo, hi) = scale.domain();
        assert_eq!(ticks[0], lo);
        assert!((ticks[ticks.len() - 1] - hi).abs() < 1e-6);
        for w in ticks.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn test_format_tick_precision() {
        let coarse = LinearScale::fitted(0.0, 1000.0, 1000.0, 0.0, (0.0, 1.0));
        assert_eq!(coarse.format_tick(200.0), "200");

        let fine = LinearScale::fitted(0.0, 0.4, 0.4, 0.0, (0.0, 1.0));
        let label = fine.format_tick(0.1);
        assert!(label.starts_with("0.1"));
    }
}
