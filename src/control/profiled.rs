use std::rc::Rc;

use crate::control::ClosedLoopConfig;
use crate::control::pid::PidController;
use crate::control::profile::{ProfileState, TrapezoidProfile};

/// PID that chases a moving setpoint produced by a [`TrapezoidProfile`]
/// instead of jumping straight to the goal.
///
/// The profiled quantity is whatever the caller measures: for position goals
/// the profile state is (position, velocity); for velocity goals it is
/// (velocity, acceleration).
#[derive(Clone, Debug)]
pub struct ProfiledPidController {
    pid: PidController,
    profile: TrapezoidProfile,
    setpoint: ProfileState,
    goal: ProfileState,
}

impl ProfiledPidController {
    pub fn new(config: Rc<ClosedLoopConfig>) -> Self {
        Self {
            profile: TrapezoidProfile::new(config.motion),
            pid: PidController::new(config),
            setpoint: ProfileState::default(),
            goal: ProfileState::default(),
        }
    }

    /// Restart the profile from a measured state.
    pub fn reset(&mut self, measurement: f64, rate: f64) {
        self.pid.reset();
        self.setpoint = ProfileState::new(measurement, rate);
    }

    /// Advance the setpoint `dt` toward `goal` and return the feedback output
    /// against it. A non-positive `dt` returns zero without moving anything.
    pub fn calculate(&mut self, measurement: f64, goal: f64, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        self.goal = ProfileState::new(goal, 0.0);
        self.setpoint = self.profile.calculate(dt, self.setpoint, self.goal);
        self.pid.calculate(measurement, self.setpoint.position, dt)
    }

    pub fn setpoint(&self) -> ProfileState {
        self.setpoint
    }

    pub fn goal(&self) -> ProfileState {
        self.goal
    }

    pub fn at_goal(&self) -> bool {
        self.pid.at_setpoint() && self.setpoint == self.goal
    }
}
