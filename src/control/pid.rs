use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::control::ClosedLoopConfig;
use crate::core::error::{Result, ensure_non_negative};

/// Feedback gains. Output is in volts per unit of error.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    /// Integration only happens while `|error|` is below this.
    pub i_zone: f64,
    /// Bound on the integral term's contribution, in volts.
    pub max_integral: f64,
    /// Error band within which [`PidController::at_setpoint`] holds.
    pub tolerance: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.0,
            ki: 0.0,
            kd: 0.0,
            i_zone: f64::INFINITY,
            max_integral: crate::core::NOMINAL_VOLTAGE,
            tolerance: 0.05,
        }
    }
}

impl PidGains {
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("kp", self.kp)?;
        ensure_non_negative("ki", self.ki)?;
        ensure_non_negative("kd", self.kd)?;
        ensure_non_negative("max_integral", self.max_integral)?;
        ensure_non_negative("tolerance", self.tolerance)?;
        if self.i_zone.is_nan() || self.i_zone < 0.0 {
            return Err(crate::core::SimError::InvalidParameter {
                name: "i_zone",
                value: self.i_zone,
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}

/// PID feedback on a scalar error. Gains come from the shared
/// [`ClosedLoopConfig`]; only the integral and last error live here.
#[derive(Clone, Debug)]
pub struct PidController {
    config: Rc<ClosedLoopConfig>,
    integral: f64,
    previous_error: Option<f64>,
}

impl PidController {
    pub fn new(config: Rc<ClosedLoopConfig>) -> Self {
        Self {
            config,
            integral: 0.0,
            previous_error: None,
        }
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = None;
    }

    pub fn get_integral(&self) -> f64 {
        self.integral
    }

    /// Returns the feedback output for driving `measurement` to `setpoint`.
    /// A non-positive `dt` returns zero and leaves the state as it was.
    pub fn calculate(&mut self, measurement: f64, setpoint: f64, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        let gains = &self.config.gains;
        let error = setpoint - measurement;

        if error.abs() >= gains.i_zone {
            self.integral = 0.0;
        } else if gains.ki > 0.0 {
            let bound = gains.max_integral / gains.ki;
            self.integral = (self.integral + error * dt).clamp(-bound, bound);
        }

        let derivative = match self.previous_error {
            Some(previous) => (error - previous) / dt,
            None => 0.0,
        };
        self.previous_error = Some(error);

        gains.kp * error + gains.ki * self.integral + gains.kd * derivative
    }

    /// Whether the last error was within tolerance.
    pub fn at_setpoint(&self) -> bool {
        self.previous_error
            .is_some_and(|error| error.abs() <= self.config.gains.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controller(gains: PidGains) -> PidController {
        PidController::new(Rc::new(ClosedLoopConfig::new(gains, Default::default()).unwrap()))
    }

    #[test]
    fn test_proportional_only() {
        let mut pid = controller(PidGains::new(2.0, 0.0, 0.0));
        assert_relative_eq!(pid.calculate(0.0, 10.0, 0.02), 20.0);
        assert_relative_eq!(pid.calculate(4.0, 10.0, 0.02), 12.0);
    }

    #[test]
    fn test_first_call_has_no_derivative_kick() {
        let mut pid = controller(PidGains::new(0.0, 0.0, 1.0));
        assert_eq!(pid.calculate(0.0, 5.0, 0.02), 0.0);
        // error 5 -> 4 over 0.5 s
        assert_relative_eq!(pid.calculate(1.0, 5.0, 0.5), -2.0);
    }

    #[test]
    fn test_integral_accumulates() {
        let mut pid = controller(PidGains::new(0.0, 1.0, 0.0));
        pid.calculate(1.0, 2.0, 0.5);
        let output = pid.calculate(1.0, 2.0, 0.5);
        assert_relative_eq!(output, 1.0);
        assert_relative_eq!(pid.get_integral(), 1.0);
    }

    #[test]
    fn test_integral_clamped() {
        let gains = PidGains {
            max_integral: 2.0,
            ..PidGains::new(0.0, 4.0, 0.0)
        };
        let mut pid = controller(gains);
        for _ in 0..100 {
            pid.calculate(0.0, 10.0, 0.1);
        }
        assert_relative_eq!(pid.calculate(0.0, 10.0, 0.1), 2.0);
    }

    #[test]
    fn test_i_zone_clears_integral() {
        let gains = PidGains {
            i_zone: 1.0,
            ..PidGains::new(0.0, 1.0, 0.0)
        };
        let mut pid = controller(gains);
        pid.calculate(0.5, 1.0, 1.0);
        assert_relative_eq!(pid.get_integral(), 0.5);
        pid.calculate(-5.0, 1.0, 1.0);
        assert_eq!(pid.get_integral(), 0.0);
    }

    #[test]
    fn test_non_positive_dt_leaves_state() {
        let mut pid = controller(PidGains::new(1.0, 1.0, 1.0));
        assert_eq!(pid.calculate(0.0, 5.0, 0.0), 0.0);
        assert_eq!(pid.calculate(0.0, 5.0, -0.1), 0.0);

        let mut fresh = controller(PidGains::new(1.0, 1.0, 1.0));
        assert_relative_eq!(pid.calculate(0.0, 5.0, 0.1), fresh.calculate(0.0, 5.0, 0.1));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut pid = controller(PidGains::new(1.0, 1.0, 1.0));
        pid.calculate(0.0, 5.0, 0.1);
        pid.calculate(1.0, 5.0, 0.1);
        pid.reset();

        let mut fresh = controller(PidGains::new(1.0, 1.0, 1.0));
        assert_relative_eq!(pid.calculate(0.0, 5.0, 0.1), fresh.calculate(0.0, 5.0, 0.1));
    }

    #[test]
    fn test_at_setpoint() {
        let mut pid = controller(PidGains::new(1.0, 0.0, 0.0));
        assert!(!pid.at_setpoint());
        pid.calculate(0.0, 1.0, 0.02);
        assert!(!pid.at_setpoint());
        pid.calculate(0.99, 1.0, 0.02);
        assert!(pid.at_setpoint());
    }

    #[test]
    fn test_negative_gain_rejected() {
        assert!(PidGains::new(-1.0, 0.0, 0.0).validate().is_err());
        let gains = PidGains {
            i_zone: f64::NAN,
            ..PidGains::default()
        };
        assert!(gains.validate().is_err());
    }
}
