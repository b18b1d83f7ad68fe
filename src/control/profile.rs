//! Trapezoidal motion profile.
//!
//! Given the current state and a goal, the profile accelerates at the
//! configured limit, cruises at the velocity limit, and decelerates so it
//! arrives at the goal with the goal's velocity. `calculate` samples that
//! trajectory `t` seconds ahead.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ensure_non_negative};

/// Velocity and acceleration limits. A zero limit means unconstrained.
#[derive(PartialEq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConstraints {
    pub cruise_velocity: f64,
    pub acceleration: f64,
}

impl MotionConstraints {
    pub fn new(cruise_velocity: f64, acceleration: f64) -> Self {
        Self {
            cruise_velocity,
            acceleration,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("cruise_velocity", self.cruise_velocity)?;
        ensure_non_negative("acceleration", self.acceleration)?;
        Ok(())
    }

    pub fn is_constrained(&self) -> bool {
        self.cruise_velocity > 0.0 && self.acceleration > 0.0
    }
}

#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct ProfileState {
    pub position: f64,
    pub velocity: f64,
}

impl ProfileState {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }

    fn mirrored(self, direction: f64) -> Self {
        Self {
            position: self.position * direction,
            velocity: self.velocity * direction,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TrapezoidProfile {
    constraints: MotionConstraints,
}

impl TrapezoidProfile {
    pub fn new(constraints: MotionConstraints) -> Self {
        Self { constraints }
    }

    /// State of the profile `t` seconds after `current`, heading to `goal`.
    pub fn calculate(&self, t: f64, current: ProfileState, goal: ProfileState) -> ProfileState {
        let Some(phases) = self.phases(current, goal) else {
            return goal;
        };
        let max_velocity = self.constraints.cruise_velocity;
        let max_acceleration = self.constraints.acceleration;
        let Phases {
            direction,
            start,
            goal,
            end_accel,
            end_full_speed,
            end_decel,
        } = phases;

        let mut result = start;
        if t < end_accel {
            result.velocity += t * max_acceleration;
            result.position += (start.velocity + t * max_acceleration / 2.0) * t;
        } else if t < end_full_speed {
            result.velocity = max_velocity;
            result.position += (start.velocity + end_accel * max_acceleration / 2.0) * end_accel
                + max_velocity * (t - end_accel);
        } else if t <= end_decel {
            let time_left = end_decel - t;
            result.velocity = goal.velocity + time_left * max_acceleration;
            result.position =
                goal.position - (goal.velocity + time_left * max_acceleration / 2.0) * time_left;
        } else {
            result = goal;
        }

        result.mirrored(direction)
    }

    /// Time for a profile starting at `current` to reach `goal`.
    pub fn total_time(&self, current: ProfileState, goal: ProfileState) -> f64 {
        self.phases(current, goal).map_or(0.0, |phases| phases.end_decel)
    }

    /// Phase boundaries of the trapezoid from `current` to `goal`, or `None`
    /// when unconstrained.
    fn phases(&self, current: ProfileState, goal: ProfileState) -> Option<Phases> {
        if !self.constraints.is_constrained() {
            return None;
        }
        let max_velocity = self.constraints.cruise_velocity;
        let max_acceleration = self.constraints.acceleration;

        // Solve every profile as if it were moving forward
        let direction = if current.position > goal.position {
            -1.0
        } else {
            1.0
        };
        let mut start = current.mirrored(direction);
        let goal = goal.mirrored(direction);
        start.velocity = start.velocity.min(max_velocity);

        // Extend the profile backwards/forwards to imaginary zero-velocity
        // endpoints so it is always a symmetric trapezoid.
        let cutoff_begin = start.velocity / max_acceleration;
        let cutoff_dist_begin = cutoff_begin * cutoff_begin * max_acceleration / 2.0;
        let cutoff_end = goal.velocity / max_acceleration;
        let cutoff_dist_end = cutoff_end * cutoff_end * max_acceleration / 2.0;

        let full_trapezoid_dist =
            cutoff_dist_begin + (goal.position - start.position) + cutoff_dist_end;
        let mut acceleration_time = max_velocity / max_acceleration;
        let mut full_speed_dist =
            full_trapezoid_dist - acceleration_time * acceleration_time * max_acceleration;

        // Triangle: never reaches cruise velocity
        if full_speed_dist < 0.0 {
            acceleration_time = (full_trapezoid_dist / max_acceleration).max(0.0).sqrt();
            full_speed_dist = 0.0;
        }

        let end_accel = acceleration_time - cutoff_begin;
        let end_full_speed = end_accel + full_speed_dist / max_velocity;
        Some(Phases {
            direction,
            start,
            goal,
            end_accel,
            end_full_speed,
            end_decel: end_full_speed + acceleration_time - cutoff_end,
        })
    }
}

/// A forward-facing trapezoid and the times its phases end.
struct Phases {
    direction: f64,
    start: ProfileState,
    goal: ProfileState,
    end_accel: f64,
    end_full_speed: f64,
    end_decel: f64,
}
