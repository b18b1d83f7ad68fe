//! A geared DC motor with an onboard closed-loop controller, in software.
//!
//! [`SimulatedActuator`] accepts one [`ControlRequest`] at a time, reduces it
//! to a [`VoltageSupplier`], and on every [`tick`](SimulatedActuator::tick)
//! evaluates that supplier and integrates the plant with the result. Plant
//! state is never reset by a request; only the source of voltage changes.
//!
//! Not thread safe. Drive `set_request` and `tick` from one control loop.

use std::rc::Rc;

use log::{debug, trace, warn};

use crate::control::{
    ClosedLoopConfig, Measured, PidController, ProfiledPidController, VoltageSupplier, reduce,
};
use crate::core::{ActuatorState, ControlRequest, NOMINAL_VOLTAGE};
use crate::simulation::derivative::RateEstimator;
use crate::simulation::physics::PlantModel;

#[derive(Debug)]
pub struct SimulatedActuator {
    plant: PlantModel,
    acceleration: RateEstimator,
    config: Rc<ClosedLoopConfig>,
    feedback: PidController,
    profiled: ProfiledPidController,
    supplier: VoltageSupplier,
    last_timestamp: f64,
}

impl SimulatedActuator {
    pub fn new(plant: PlantModel, config: ClosedLoopConfig) -> Self {
        let config = Rc::new(config);
        Self {
            plant,
            acceleration: RateEstimator::new(),
            feedback: PidController::new(Rc::clone(&config)),
            profiled: ProfiledPidController::new(Rc::clone(&config)),
            config,
            supplier: VoltageSupplier::default(),
            last_timestamp: 0.0,
        }
    }

    /// Timestamp the first `tick` measures its step from. Defaults to 0.
    pub fn with_start_time(mut self, timestamp: f64) -> Self {
        self.last_timestamp = timestamp;
        self
    }

    pub fn with_rate_estimator(mut self, estimator: RateEstimator) -> Self {
        self.acceleration = estimator;
        self
    }

    /// Replace the active request. Requests that are not modeled (followers,
    /// unrecognized modes) are accepted and leave the active supplier as is.
    pub fn set_request(&mut self, request: ControlRequest) {
        let Some(next) = reduce(&request) else {
            debug!("ignoring unmodeled request {}", request.name());
            return;
        };

        if !self.supplier.same_loop(&next) {
            debug!("switching to {} ({:?})", request.name(), next);
            self.reset_controller_for(&next);
        }
        self.supplier = next;
    }

    /// Advance the simulation to `timestamp` seconds.
    ///
    /// A timestamp that is not later than the previous one integrates
    /// nothing and leaves every controller as it was.
    pub fn tick(&mut self, timestamp: f64) {
        let dt = timestamp - self.last_timestamp;
        if !dt.is_finite() || dt <= 0.0 {
            trace!("skipping tick at {timestamp}, dt={dt}");
            return;
        }

        let requested = self.supply_voltage(dt);
        let voltage = if requested.is_finite() {
            requested.clamp(-NOMINAL_VOLTAGE, NOMINAL_VOLTAGE)
        } else {
            warn!("supplier {:?} produced {requested}, applying 0 V", self.supplier);
            0.0
        };

        self.plant.integrate(voltage, dt);
        self.acceleration.update(self.plant.velocity(), timestamp);
        self.last_timestamp = timestamp;

        trace!(
            "t={timestamp:.3} V={voltage:.3} pos={:.4} vel={:.4}",
            self.plant.position(),
            self.plant.velocity()
        );
    }

    /// Shorthand for `tick(timestamp() + dt)`.
    pub fn advance(&mut self, dt: f64) {
        self.tick(self.last_timestamp + dt);
    }

    fn measure(&self, measured: Measured) -> f64 {
        match measured {
            Measured::Position => self.plant.position(),
            Measured::Velocity => self.plant.velocity(),
        }
    }

    fn supply_voltage(&mut self, dt: f64) -> f64 {
        match self.supplier {
            VoltageSupplier::Constant(volts) => volts,
            VoltageSupplier::Feedback {
                measured,
                target,
                feed_forward,
            } => {
                let measurement = self.measure(measured);
                self.feedback.calculate(measurement, target, dt) + feed_forward
            }
            VoltageSupplier::Profiled {
                measured,
                goal,
                feed_forward,
            } => {
                let measurement = self.measure(measured);
                self.profiled.calculate(measurement, goal, dt) + feed_forward
            }
        }
    }

    fn reset_controller_for(&mut self, next: &VoltageSupplier) {
        match *next {
            VoltageSupplier::Constant(_) => {}
            VoltageSupplier::Feedback { .. } => self.feedback.reset(),
            VoltageSupplier::Profiled { measured, .. } => {
                let (value, rate) = match measured {
                    Measured::Position => (self.plant.position(), self.plant.velocity()),
                    Measured::Velocity => (self.plant.velocity(), self.acceleration.get()),
                };
                self.profiled.reset(value, rate);
            }
        }
    }

    pub fn position(&self) -> f64 {
        self.plant.position()
    }

    pub fn velocity(&self) -> f64 {
        self.plant.velocity()
    }

    /// Estimated from successive velocity samples, not from the model.
    pub fn acceleration(&self) -> f64 {
        self.acceleration.get()
    }

    pub fn current(&self) -> f64 {
        self.plant.current()
    }

    pub fn voltage(&self) -> f64 {
        self.plant.voltage()
    }

    pub fn state(&self) -> ActuatorState {
        self.plant.state()
    }

    pub fn timestamp(&self) -> f64 {
        self.last_timestamp
    }

    pub fn active_supplier(&self) -> &VoltageSupplier {
        &self.supplier
    }

    pub fn config(&self) -> &ClosedLoopConfig {
        &self.config
    }

    pub fn plant(&self) -> &PlantModel {
        &self.plant
    }

    pub fn profiled_controller(&self) -> &ProfiledPidController {
        &self.profiled
    }
}
