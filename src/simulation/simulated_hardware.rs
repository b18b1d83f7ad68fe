use std::f64::consts::PI;

use crate::core::{ControlRequest, MotorInputs, MotorIo};
use crate::simulation::actuator::SimulatedActuator;

/// [`MotorIo`] backed by a [`SimulatedActuator`], standing in for a real
/// motor controller on the bus.
pub struct SimulatedMotorIo {
    actuator: SimulatedActuator,
    inputs: MotorInputs,
    gear_ratio: f64,
    wheel_diameter: f64,
}

impl SimulatedMotorIo {
    pub fn new(actuator: SimulatedActuator) -> Self {
        Self {
            actuator,
            inputs: MotorInputs::default(),
            gear_ratio: 1.0,
            wheel_diameter: 0.0,
        }
    }

    /// Report linear distance for a wheel or spool of `diameter` driven
    /// through `gear_ratio` motor rotations per wheel rotation. The actuator
    /// position must be in rotations for the distance to be meaningful.
    pub fn with_linear_mechanism(mut self, gear_ratio: f64, diameter: f64) -> Self {
        self.gear_ratio = gear_ratio;
        self.wheel_diameter = diameter;
        self
    }

    pub fn actuator(&self) -> &SimulatedActuator {
        &self.actuator
    }

    fn distance(&self, rotations: f64) -> f64 {
        if self.wheel_diameter == 0.0 || self.gear_ratio == 0.0 {
            return 0.0;
        }
        rotations / self.gear_ratio * PI * self.wheel_diameter
    }
}

impl MotorIo for SimulatedMotorIo {
    fn set_request(&mut self, request: ControlRequest) {
        self.actuator.set_request(request);
    }

    fn update_inputs(&mut self, timestamp: f64) {
        self.actuator.tick(timestamp);
        let position = self.actuator.position();
        self.inputs = MotorInputs {
            position,
            distance: self.distance(position),
            velocity: self.actuator.velocity(),
            acceleration: self.actuator.acceleration(),
            voltage: self.actuator.voltage(),
            current: self.actuator.current(),
        };
    }

    fn inputs(&self) -> &MotorInputs {
        &self.inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ClosedLoopConfig;
    use crate::simulation::motors::MotorKind;
    use crate::simulation::RADIANS_TO_ROTATIONS;
    use crate::simulation::physics::PlantModel;
    use approx::assert_relative_eq;

    fn motor_io() -> SimulatedMotorIo {
        let motor = MotorKind::KrakenX60Foc.motor(1).unwrap();
        let plant = PlantModel::new(motor, 1.0, 0.003, RADIANS_TO_ROTATIONS).unwrap();
        SimulatedMotorIo::new(SimulatedActuator::new(plant, ClosedLoopConfig::default()))
    }

    #[test]
    fn test_inputs_mirror_actuator() {
        let mut io = motor_io();
        io.set_request(ControlRequest::voltage(4.0));
        io.update_inputs(0.02);
        io.update_inputs(0.04);

        let inputs = *io.inputs();
        let actuator = io.actuator();
        assert_eq!(inputs.position, actuator.position());
        assert_eq!(inputs.velocity, actuator.velocity());
        assert_eq!(inputs.acceleration, actuator.acceleration());
        assert_eq!(inputs.voltage, 4.0);
        assert_eq!(inputs.current, actuator.current());
        assert_eq!(inputs.distance, 0.0);
    }

    #[test]
    fn test_linear_distance() {
        let mut io = motor_io().with_linear_mechanism(5.0, 0.05);
        io.set_request(ControlRequest::voltage(6.0));
        for i in 1..=25 {
            io.update_inputs(f64::from(i) * 0.02);
        }
        let inputs = io.inputs();
        assert!(inputs.position > 0.0);
        assert_relative_eq!(
            inputs.distance,
            inputs.position / 5.0 * PI * 0.05,
            max_relative = 1e-12
        );
    }
}
