//! Construction parameters for a simulated actuator, loadable from TOML.
//!
//! ```toml
//! motor = "kraken_x60_foc"
//! motor_count = 1
//! gearing = 1.0
//! moment_of_inertia = 0.003
//! conversion_factor = 0.15915494309189535
//!
//! [gains]
//! kp = 2.0
//!
//! [motion]
//! cruise_velocity = 20.0
//! acceleration = 40.0
//! ```
//!
//! A motor without a preset can be given as a table with `nominal_voltage`,
//! `stall_torque`, `stall_current`, `free_current` and `free_speed` (rad/s).

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::control::{ClosedLoopConfig, MotionConstraints, PidGains};
use crate::core::Result;
use crate::simulation::{
    DcMotor, MotorConstants, MotorKind, PlantModel, RateEstimator, SimulatedActuator,
};

#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MotorSpec {
    Preset(MotorKind),
    Custom(MotorConstants),
}

impl MotorSpec {
    pub fn motor(&self, count: u32) -> Result<DcMotor> {
        match self {
            MotorSpec::Preset(kind) => kind.motor(count),
            MotorSpec::Custom(constants) => DcMotor::from_constants(constants, count),
        }
    }
}

#[derive(PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct ActuatorConfig {
    pub motor: MotorSpec,
    #[serde(default = "default_motor_count")]
    pub motor_count: u32,
    #[serde(default = "default_unity")]
    pub gearing: f64,
    /// Load inertia in kg·m².
    pub moment_of_inertia: f64,
    /// Output units per radian of the mechanism.
    #[serde(default = "default_unity")]
    pub conversion_factor: f64,
    /// Exponential smoothing of the acceleration estimate, in `(0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration_smoothing: Option<f64>,
    #[serde(default)]
    pub gains: PidGains,
    #[serde(default)]
    pub motion: MotionConstraints,
}

fn default_motor_count() -> u32 {
    1
}

fn default_unity() -> f64 {
    1.0
}

impl ActuatorConfig {
    pub fn new(motor: MotorSpec, moment_of_inertia: f64) -> Self {
        Self {
            motor,
            motor_count: default_motor_count(),
            gearing: default_unity(),
            moment_of_inertia,
            conversion_factor: default_unity(),
            acceleration_smoothing: None,
            gains: PidGains::default(),
            motion: MotionConstraints::default(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading actuator config from {}", path.display());
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    pub fn plant(&self) -> Result<PlantModel> {
        let motor = self.motor.motor(self.motor_count)?;
        PlantModel::new(
            motor,
            self.gearing,
            self.moment_of_inertia,
            self.conversion_factor,
        )
    }

    /// Validate every parameter and build the actuator, at rest.
    pub fn build(&self) -> Result<SimulatedActuator> {
        let plant = self.plant()?;
        let closed_loop = ClosedLoopConfig::new(self.gains, self.motion)?;
        let mut estimator = RateEstimator::new();
        if let Some(alpha) = self.acceleration_smoothing {
            estimator = estimator.with_smoothing(alpha)?;
        }
        Ok(SimulatedActuator::new(plant, closed_loop).with_rate_estimator(estimator))
    }
}
