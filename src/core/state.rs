/// Kinematic and electrical state of the simulated mechanism.
///
/// Position and velocity are in mechanism-output units (after gearing and the
/// conversion factor). Current is in amps, voltage in volts.
#[derive(PartialEq, Clone, Copy, Debug, Default)]
pub struct ActuatorState {
    pub position: f64,
    pub velocity: f64,
    pub current: f64,
    pub voltage: f64,
}

impl ActuatorState {
    /// All quantities at rest.
    pub fn at_rest() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest_is_zero() {
        let state = ActuatorState::at_rest();
        assert_eq!(state.position, 0.0);
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.current, 0.0);
        assert_eq!(state.voltage, 0.0);
    }
}
