use crate::control::{Measured, VoltageSupplier};
use crate::simulation::SimulatedActuator;

pub struct DisplayData {
    pub time: f64,
    pub request: String,
    pub supplier: String,
    pub profile_setpoint: Option<f64>,

    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    pub voltage: f64,
    pub current: f64,
}

impl DisplayData {
    pub fn capture(actuator: &SimulatedActuator, request: &str) -> Self {
        let supplier = actuator.active_supplier();
        let profile_setpoint = match supplier {
            VoltageSupplier::Profiled { .. } => {
                Some(actuator.profiled_controller().setpoint().position)
            }
            _ => None,
        };

        Self {
            time: actuator.timestamp(),
            request: request.to_string(),
            supplier: format_supplier(supplier),
            profile_setpoint,
            position: actuator.position(),
            velocity: actuator.velocity(),
            acceleration: actuator.acceleration(),
            voltage: actuator.voltage(),
            current: actuator.current(),
        }
    }
}

fn format_measured(measured: Measured) -> &'static str {
    match measured {
        Measured::Position => "position",
        Measured::Velocity => "velocity",
    }
}

pub fn format_supplier(supplier: &VoltageSupplier) -> String {
    match supplier {
        VoltageSupplier::Constant(volts) => format!("constant {volts:.2} V"),
        VoltageSupplier::Feedback {
            measured,
            target,
            feed_forward,
        } => format!(
            "PID on {} -> {target:.3} (+{feed_forward:.2} V ff)",
            format_measured(*measured)
        ),
        VoltageSupplier::Profiled {
            measured,
            goal,
            feed_forward,
        } => format!(
            "profiled PID on {} -> {goal:.3} (+{feed_forward:.2} V ff)",
            format_measured(*measured)
        ),
    }
}

pub fn log_to_terminal(display_data: &DisplayData) {
    print!("\x1B[2J\x1B[1;1H");

    println!("--- Command ---");
    println!("Time: {:.2}s", display_data.time);
    println!("Request: {}", display_data.request);
    println!("Supplier: {}", display_data.supplier);
    if let Some(setpoint) = display_data.profile_setpoint {
        println!("Profile Setpoint: {setpoint:.3}");
    }

    println!("\n--- Mechanism ---");
    println!("Position: {:.3}", display_data.position);
    println!("Velocity: {:.3}/s", display_data.velocity);
    println!("Acceleration: {:.3}/s²", display_data.acceleration);

    println!("\n--- Motor ---");
    println!("Voltage: {:.2}V", display_data.voltage);
    println!("Current: {:.2}A", display_data.current);
    println!("----------------------\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_supplier() {
        assert_eq!(
            format_supplier(&VoltageSupplier::Constant(6.0)),
            "constant 6.00 V"
        );
        let supplier = VoltageSupplier::Profiled {
            measured: Measured::Velocity,
            goal: 2.5,
            feed_forward: 0.5,
        };
        assert_eq!(
            format_supplier(&supplier),
            "profiled PID on velocity -> 2.500 (+0.50 V ff)"
        );
    }
}
