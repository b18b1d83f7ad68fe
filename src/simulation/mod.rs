pub mod actuator;
pub mod derivative;
pub mod motors;
pub mod physics;
pub mod simulated_hardware;

pub use actuator::SimulatedActuator;
pub use derivative::RateEstimator;
pub use motors::{DcMotor, MotorConstants, MotorKind};
pub use physics::PlantModel;
pub use simulated_hardware::SimulatedMotorIo;

/// Conversion factor that makes a plant report rotations instead of radians.
pub const RADIANS_TO_ROTATIONS: f64 = 1.0 / std::f64::consts::TAU;
