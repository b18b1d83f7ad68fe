pub mod config;
pub mod error;
pub mod hardware;
pub mod request;
pub mod state;

pub use config::{ActuatorConfig, MotorSpec};
pub use error::{Result, SimError};
pub use hardware::{MotorInputs, MotorIo};
pub use request::ControlRequest;
pub use state::ActuatorState;

/// Supply voltage that duty-cycle and current-based requests are scaled by.
pub const NOMINAL_VOLTAGE: f64 = 12.0;
