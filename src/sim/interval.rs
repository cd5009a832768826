//! Host-agnostic repeating timer
//!
//! Browsers drive cosmetic timers with `setInterval`; headless hosts advance
//! one of these with the frame delta instead.

/// Fires once per elapsed period
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    period_ms: f64,
    elapsed_ms: f64,
}

impl Interval {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            elapsed_ms: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Advance by `dt_ms`, returning how many periods completed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms += dt_ms;
        }
        let fired = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms %= self.period_ms;
        fired.min(f64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let mut interval = Interval::new(100.0);
        assert_eq!(interval.advance(60.0), 0);
        assert_eq!(interval.advance(60.0), 1);
        assert_eq!(interval.advance(250.0), 2);
    }

    #[test]
    fn test_reset_and_bad_deltas() {
        let mut interval = Interval::new(100.0);
        interval.advance(90.0);
        interval.reset();
        assert_eq!(interval.advance(20.0), 0);
        assert_eq!(interval.advance(-500.0), 0);
        assert_eq!(interval.advance(f64::NAN), 0);
    }

    #[test]
    fn test_huge_delta_returns_count_and_keeps_remainder() {
        let mut interval = Interval::new(10_000.0);
        assert_eq!(interval.advance(1.0e12 + 2_500.0), 100_000_000);
        assert_eq!(interval.advance(7_500.0), 1);
        assert_eq!(interval.advance(9_999.0), 0);
    }
}
