pub mod dispatch;
pub mod pid;
pub mod profile;
pub mod profiled;

use serde::{Deserialize, Serialize};

use crate::core::Result;
pub use dispatch::{Measured, VoltageSupplier, reduce};
pub use pid::{PidController, PidGains};
pub use profile::{MotionConstraints, ProfileState, TrapezoidProfile};
pub use profiled::ProfiledPidController;

/// Gains and motion limits shared by the feedback and profiled controllers
/// of one actuator. Fixed once built.
#[derive(PartialEq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ClosedLoopConfig {
    #[serde(default)]
    pub gains: PidGains,
    #[serde(default)]
    pub motion: MotionConstraints,
}

impl ClosedLoopConfig {
    pub fn new(gains: PidGains, motion: MotionConstraints) -> Result<Self> {
        gains.validate()?;
        motion.validate()?;
        Ok(Self { gains, motion })
    }
}
