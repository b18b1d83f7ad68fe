//! Reduction of every [`ControlRequest`] to a source of applied voltage.
//!
//! Closed-loop modes become "controller output plus a linearly scaled
//! feed-forward"; duty-cycle and current-based forms are scaled by the
//! nominal supply voltage. The plant only ever sees volts.

use crate::core::{ControlRequest, NOMINAL_VOLTAGE};

/// Quantity a closed-loop supplier measures.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Measured {
    Position,
    Velocity,
}

/// What produces the applied voltage each tick.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum VoltageSupplier {
    Constant(f64),
    /// PID on `measured` toward `target`, plus `feed_forward` volts.
    Feedback {
        measured: Measured,
        target: f64,
        feed_forward: f64,
    },
    /// Motion-profiled PID on `measured` toward `goal`, plus `feed_forward` volts.
    Profiled {
        measured: Measured,
        goal: f64,
        feed_forward: f64,
    },
}

impl Default for VoltageSupplier {
    fn default() -> Self {
        VoltageSupplier::Constant(0.0)
    }
}

impl VoltageSupplier {
    /// Whether switching from `self` to `next` keeps the same controller
    /// working on the same quantity.
    pub fn same_loop(&self, next: &VoltageSupplier) -> bool {
        use VoltageSupplier::*;
        match (self, next) {
            (Feedback { measured: a, .. }, Feedback { measured: b, .. }) => a == b,
            (Profiled { measured: a, .. }, Profiled { measured: b, .. }) => a == b,
            (Constant(_), Constant(_)) => true,
            _ => false,
        }
    }
}

fn feedback(measured: Measured, target: f64, feed_forward: f64) -> Option<VoltageSupplier> {
    Some(VoltageSupplier::Feedback {
        measured,
        target,
        feed_forward,
    })
}

fn profiled(measured: Measured, goal: f64, feed_forward: f64) -> Option<VoltageSupplier> {
    Some(VoltageSupplier::Profiled {
        measured,
        goal,
        feed_forward,
    })
}

/// Maps a request to its voltage supplier. `None` means the request is not
/// modeled and the active supplier should stay in force.
pub fn reduce(request: &ControlRequest) -> Option<VoltageSupplier> {
    use ControlRequest::*;
    use Measured::{Position, Velocity};

    match *request {
        DutyCycleOut { output } => reduce(&VoltageOut {
            output: output * NOMINAL_VOLTAGE,
        }),
        VoltageOut { output } => Some(VoltageSupplier::Constant(output)),
        TorqueCurrent { output } => reduce(&VoltageOut {
            output: output * NOMINAL_VOLTAGE,
        }),

        PositionDutyCycle {
            position,
            feed_forward,
        } => reduce(&PositionVoltage {
            position,
            feed_forward: feed_forward * NOMINAL_VOLTAGE,
        }),
        PositionVoltage {
            position,
            feed_forward,
        } => feedback(Position, position, feed_forward),
        PositionTorqueCurrent {
            position,
            feed_forward,
        } => feedback(Position, position, feed_forward * NOMINAL_VOLTAGE),

        VelocityDutyCycle {
            velocity,
            feed_forward,
        } => reduce(&VelocityVoltage {
            velocity,
            feed_forward: feed_forward * NOMINAL_VOLTAGE,
        }),
        VelocityVoltage {
            velocity,
            feed_forward,
        } => feedback(Velocity, velocity, feed_forward),
        VelocityTorqueCurrent {
            velocity,
            feed_forward,
        } => feedback(Velocity, velocity, feed_forward * NOMINAL_VOLTAGE),

        MotionMagicDutyCycle {
            position,
            feed_forward,
        } => reduce(&MotionMagicVoltage {
            position,
            feed_forward: feed_forward * NOMINAL_VOLTAGE,
        }),
        MotionMagicVoltage {
            position,
            feed_forward,
        } => profiled(Position, position, feed_forward),
        MotionMagicTorqueCurrent {
            position,
            feed_forward,
        } => profiled(Position, position, feed_forward * NOMINAL_VOLTAGE),

        MotionMagicVelocityDutyCycle {
            velocity,
            feed_forward,
        } => reduce(&MotionMagicVelocityVoltage {
            velocity,
            feed_forward: feed_forward * NOMINAL_VOLTAGE,
        }),
        MotionMagicVelocityVoltage {
            velocity,
            feed_forward,
        } => profiled(Velocity, velocity, feed_forward),
        MotionMagicVelocityTorqueCurrent {
            velocity,
            feed_forward,
        } => profiled(Velocity, velocity, feed_forward * NOMINAL_VOLTAGE),

        // TODO: model followers once a shared bus can hand over the leader's output
        Follower { .. } => None,
        Unrecognized(_) => None,
    }
}
