use crate::core::request::ControlRequest;

/// Latest readings published by a motor, real or simulated.
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct MotorInputs {
    pub position: f64,
    /// Linear travel of a wheel or spool driven by the motor. Stays zero for
    /// mechanisms that are not linear.
    pub distance: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub voltage: f64,
    pub current: f64,
}

/// Common surface for a motor the control stack talks to.
pub trait MotorIo {
    fn set_request(&mut self, request: ControlRequest);
    /// Refresh [`MotorInputs`]; called once per control loop iteration.
    fn update_inputs(&mut self, timestamp: f64);
    fn inputs(&self) -> &MotorInputs;
}
