//! Control requests accepted by a simulated actuator.
//!
//! Each variant mirrors one control mode of a smart motor controller. Targets
//! are in mechanism-output units; `feed_forward` is in the unit of the request
//! family (duty cycle, volts, or the current-based "torque" form).

#[derive(PartialEq, Clone, Debug)]
pub enum ControlRequest {
    /// Fraction of the nominal supply, in `[-1, 1]`.
    DutyCycleOut { output: f64 },
    VoltageOut { output: f64 },
    /// Current-based open loop, approximated as a fraction of the supply.
    TorqueCurrent { output: f64 },

    PositionDutyCycle { position: f64, feed_forward: f64 },
    PositionVoltage { position: f64, feed_forward: f64 },
    PositionTorqueCurrent { position: f64, feed_forward: f64 },

    VelocityDutyCycle { velocity: f64, feed_forward: f64 },
    VelocityVoltage { velocity: f64, feed_forward: f64 },
    VelocityTorqueCurrent { velocity: f64, feed_forward: f64 },

    MotionMagicDutyCycle { position: f64, feed_forward: f64 },
    MotionMagicVoltage { position: f64, feed_forward: f64 },
    MotionMagicTorqueCurrent { position: f64, feed_forward: f64 },

    MotionMagicVelocityDutyCycle { velocity: f64, feed_forward: f64 },
    MotionMagicVelocityVoltage { velocity: f64, feed_forward: f64 },
    MotionMagicVelocityTorqueCurrent { velocity: f64, feed_forward: f64 },

    /// Follow another controller. Not modeled: cross-actuator following
    /// needs the leader's output, which a single actuator does not see.
    Follower { leader_id: u32, oppose_leader: bool },

    /// A mode this simulator does not know about, named for diagnostics.
    Unrecognized(String),
}

impl ControlRequest {
    pub fn duty_cycle(output: f64) -> Self {
        ControlRequest::DutyCycleOut { output }
    }

    pub fn voltage(output: f64) -> Self {
        ControlRequest::VoltageOut { output }
    }

    pub fn position(position: f64) -> Self {
        ControlRequest::PositionVoltage {
            position,
            feed_forward: 0.0,
        }
    }

    pub fn velocity(velocity: f64) -> Self {
        ControlRequest::VelocityVoltage {
            velocity,
            feed_forward: 0.0,
        }
    }

    pub fn motion_magic(position: f64) -> Self {
        ControlRequest::MotionMagicVoltage {
            position,
            feed_forward: 0.0,
        }
    }

    pub fn motion_magic_velocity(velocity: f64) -> Self {
        ControlRequest::MotionMagicVelocityVoltage {
            velocity,
            feed_forward: 0.0,
        }
    }

    /// Replaces the feed-forward term of a closed-loop request. Open-loop
    /// requests are returned unchanged.
    pub fn with_feed_forward(self, value: f64) -> Self {
        use ControlRequest::*;
        match self {
            PositionDutyCycle { position, .. } => PositionDutyCycle {
                position,
                feed_forward: value,
            },
            PositionVoltage { position, .. } => PositionVoltage {
                position,
                feed_forward: value,
            },
            PositionTorqueCurrent { position, .. } => PositionTorqueCurrent {
                position,
                feed_forward: value,
            },
            VelocityDutyCycle { velocity, .. } => VelocityDutyCycle {
                velocity,
                feed_forward: value,
            },
            VelocityVoltage { velocity, .. } => VelocityVoltage {
                velocity,
                feed_forward: value,
            },
            VelocityTorqueCurrent { velocity, .. } => VelocityTorqueCurrent {
                velocity,
                feed_forward: value,
            },
            MotionMagicDutyCycle { position, .. } => MotionMagicDutyCycle {
                position,
                feed_forward: value,
            },
            MotionMagicVoltage { position, .. } => MotionMagicVoltage {
                position,
                feed_forward: value,
            },
            MotionMagicTorqueCurrent { position, .. } => MotionMagicTorqueCurrent {
                position,
                feed_forward: value,
            },
            MotionMagicVelocityDutyCycle { velocity, .. } => MotionMagicVelocityDutyCycle {
                velocity,
                feed_forward: value,
            },
            MotionMagicVelocityVoltage { velocity, .. } => MotionMagicVelocityVoltage {
                velocity,
                feed_forward: value,
            },
            MotionMagicVelocityTorqueCurrent { velocity, .. } => {
                MotionMagicVelocityTorqueCurrent {
                    velocity,
                    feed_forward: value,
                }
            }
            other => other,
        }
    }

    /// Short mode name, used in logs and the terminal UI.
    pub fn name(&self) -> &str {
        use ControlRequest::*;
        match self {
            DutyCycleOut { .. } => "DutyCycleOut",
            VoltageOut { .. } => "VoltageOut",
            TorqueCurrent { .. } => "TorqueCurrent",
            PositionDutyCycle { .. } => "PositionDutyCycle",
            PositionVoltage { .. } => "PositionVoltage",
            PositionTorqueCurrent { .. } => "PositionTorqueCurrent",
            VelocityDutyCycle { .. } => "VelocityDutyCycle",
            VelocityVoltage { .. } => "VelocityVoltage",
            VelocityTorqueCurrent { .. } => "VelocityTorqueCurrent",
            MotionMagicDutyCycle { .. } => "MotionMagicDutyCycle",
            MotionMagicVoltage { .. } => "MotionMagicVoltage",
            MotionMagicTorqueCurrent { .. } => "MotionMagicTorqueCurrent",
            MotionMagicVelocityDutyCycle { .. } => "MotionMagicVelocityDutyCycle",
            MotionMagicVelocityVoltage { .. } => "MotionMagicVelocityVoltage",
            MotionMagicVelocityTorqueCurrent { .. } => "MotionMagicVelocityTorqueCurrent",
            Follower { .. } => "Follower",
            Unrecognized(name) => name,
        }
    }

    /// Whether applying this request changes what the actuator does.
    /// `Follower` and unrecognized requests are accepted but ignored.
    pub fn is_supported(&self) -> bool {
        !matches!(
            self,
            ControlRequest::Follower { .. } | ControlRequest::Unrecognized(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_feed_forward_replaces_term() {
        let request = ControlRequest::position(3.0).with_feed_forward(0.5);
        assert_eq!(
            request,
            ControlRequest::PositionVoltage {
                position: 3.0,
                feed_forward: 0.5
            }
        );
    }

    #[test]
    fn test_with_feed_forward_ignores_open_loop() {
        let request = ControlRequest::voltage(4.0).with_feed_forward(1.0);
        assert_eq!(request, ControlRequest::VoltageOut { output: 4.0 });
    }

    #[test]
    fn test_supported_modes() {
        assert!(ControlRequest::duty_cycle(0.5).is_supported());
        assert!(ControlRequest::motion_magic_velocity(2.0).is_supported());
        assert!(
            !ControlRequest::Follower {
                leader_id: 3,
                oppose_leader: false
            }
            .is_supported()
        );
        assert!(!ControlRequest::Unrecognized("DifferentialVoltage".into()).is_supported());
    }

    #[test]
    fn test_unrecognized_name_passes_through() {
        let request = ControlRequest::Unrecognized("MusicTone".into());
        assert_eq!(request.name(), "MusicTone");
        assert_eq!(ControlRequest::velocity(1.0).name(), "VelocityVoltage");
    }
}
