use crate::core::SimError;
use crate::core::error::{Result, ensure_positive};

/// Backward-difference rate of a sampled signal.
///
/// The first sample only seeds the estimator and reports zero. A sample whose
/// timestamp is not strictly later than the stored one is dropped and the
/// previous estimate is held.
#[derive(Clone, Debug)]
pub struct RateEstimator {
    last: Option<(f64, f64)>, // (sample, timestamp)
    rate: f64,
    smoothing: f64,
}

impl Default for RateEstimator {
    fn default() -> Self {
        RateEstimator::new()
    }
}

impl RateEstimator {
    pub fn new() -> Self {
        Self {
            last: None,
            rate: 0.0,
            smoothing: 1.0,
        }
    }

    /// Blend each new difference with the previous estimate:
    /// `rate = alpha·raw + (1 - alpha)·rate`. `alpha` must lie in `(0, 1]`;
    /// 1 disables smoothing.
    pub fn with_smoothing(mut self, alpha: f64) -> Result<Self> {
        ensure_positive("acceleration_smoothing", alpha)?;
        if alpha > 1.0 {
            return Err(SimError::InvalidParameter {
                name: "acceleration_smoothing",
                value: alpha,
                reason: "must not exceed 1",
            });
        }
        self.smoothing = alpha;
        Ok(self)
    }

    pub fn update(&mut self, sample: f64, timestamp: f64) {
        if !sample.is_finite() || !timestamp.is_finite() {
            return;
        }

        match self.last {
            None => {
                self.rate = 0.0;
                self.last = Some((sample, timestamp));
            }
            Some((previous, previous_time)) if timestamp > previous_time => {
                let raw = (sample - previous) / (timestamp - previous_time);
                self.rate = self.smoothing * raw + (1.0 - self.smoothing) * self.rate;
                self.last = Some((sample, timestamp));
            }
            Some(_) => {}
        }
    }

    pub fn get(&self) -> f64 {
        self.rate
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.rate = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_sample_reports_zero() {
        let mut rate = RateEstimator::new();
        assert_eq!(rate.get(), 0.0);
        rate.update(5.0, 1.0);
        assert_eq!(rate.get(), 0.0);
    }

    #[test]
    fn test_linear_signal_slope() {
        let mut rate = RateEstimator::new();
        for i in 0..10 {
            let t = f64::from(i) * 0.02;
            rate.update(3.0 * t + 1.0, t);
        }
        assert_relative_eq!(rate.get(), 3.0, max_relative = 1e-9);
    }

    #[test]
    fn test_repeated_timestamp_holds_estimate() {
        let mut rate = RateEstimator::new();
        rate.update(0.0, 0.0);
        rate.update(1.0, 0.5);
        assert_relative_eq!(rate.get(), 2.0);

        rate.update(100.0, 0.5);
        assert_relative_eq!(rate.get(), 2.0);

        // The dropped sample is not used as the next reference point
        rate.update(2.0, 1.0);
        assert_relative_eq!(rate.get(), 2.0);
    }

    #[test]
    fn test_backwards_timestamp_holds_estimate() {
        let mut rate = RateEstimator::new();
        rate.update(0.0, 1.0);
        rate.update(4.0, 2.0);
        rate.update(-50.0, 1.5);
        assert_relative_eq!(rate.get(), 4.0);
    }

    #[test]
    fn test_smoothing_blends_estimates() {
        let mut rate = RateEstimator::new().with_smoothing(0.5).unwrap();
        rate.update(0.0, 0.0);
        rate.update(1.0, 1.0);
        assert_relative_eq!(rate.get(), 0.5);
        rate.update(2.0, 2.0);
        assert_relative_eq!(rate.get(), 0.75);
    }

    #[test]
    fn test_smoothing_outside_unit_interval_rejected() {
        for alpha in [0.0, -1.0, 5.0, f64::NAN] {
            assert!(
                matches!(
                    RateEstimator::new().with_smoothing(alpha),
                    Err(SimError::InvalidParameter {
                        name: "acceleration_smoothing",
                        ..
                    })
                ),
                "alpha = {alpha}"
            );
        }
        assert!(RateEstimator::new().with_smoothing(1.0).is_ok());
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut rate = RateEstimator::new();
        rate.update(0.0, 0.0);
        rate.update(10.0, 1.0);
        rate.reset();
        assert_eq!(rate.get(), 0.0);
        rate.update(50.0, 2.0);
        assert_eq!(rate.get(), 0.0);
    }
}
