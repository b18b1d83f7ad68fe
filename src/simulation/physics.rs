use log::trace;

use crate::core::error::{Result, ensure_finite, ensure_positive};
use crate::core::{ActuatorState, SimError};
use crate::simulation::motors::DcMotor;

/// Largest `|A|·dt` integrated in one Euler substep.
const MAX_DECAY_PER_SUBSTEP: f64 = 0.5;
/// Steps needing more Euler substeps than this are solved in closed form.
const MAX_SUBSTEPS: f64 = 256.0;

/// Geared DC motor driving an inertial load.
///
/// The mechanism-side dynamics are first order in velocity:
///
/// ```text
/// dω/dt = A·ω + B·V      A = -G²·Kt / (Kv·R·J),  B = G·Kt / (R·J)
/// dθ/dt = ω
/// ```
///
/// `θ` and `ω` are kept in radians of the mechanism output; the accessors
/// scale them by `conversion_factor`.
#[derive(Clone, Debug)]
pub struct PlantModel {
    // Physical parameters
    motor: DcMotor,
    gearing: f64,           // motor turns per output turn
    moment_of_inertia: f64, // kg·m²
    conversion_factor: f64, // output units per radian

    // Linear system
    a: f64, // 1/s
    b: f64, // rad/s² per volt

    // State variables
    angle: f64,        // rad
    angular_rate: f64, // rad/s
    current: f64,      // A
    voltage: f64,      // V
}

impl PlantModel {
    pub fn new(
        motor: DcMotor,
        gearing: f64,
        moment_of_inertia: f64,
        conversion_factor: f64,
    ) -> Result<Self> {
        ensure_positive("gearing", gearing)?;
        ensure_positive("moment_of_inertia", moment_of_inertia)?;
        ensure_conversion(conversion_factor)?;

        let a = -gearing * gearing * motor.kt
            / (motor.kv * motor.resistance * moment_of_inertia);
        let b = gearing * motor.kt / (motor.resistance * moment_of_inertia);

        Ok(Self {
            motor,
            gearing,
            moment_of_inertia,
            conversion_factor,
            a,
            b,
            angle: 0.0,
            angular_rate: 0.0,
            current: 0.0,
            voltage: 0.0,
        })
    }

    /// Builds the plant from an identified system `dω/dt = a·ω + b·V`.
    ///
    /// Gearing and inertia are recovered from the motor constants, so the
    /// current draw stays consistent with the identified dynamics.
    pub fn from_linear_system(
        a: f64,
        b: f64,
        motor: DcMotor,
        conversion_factor: f64,
    ) -> Result<Self> {
        ensure_finite("a", a)?;
        ensure_positive("b", b)?;
        if a >= 0.0 {
            return Err(SimError::InvalidParameter {
                name: "a",
                value: a,
                reason: "must be negative for a stable plant",
            });
        }

        let gearing = -motor.kv * a / b;
        let moment_of_inertia = gearing * motor.kt / (motor.resistance * b);
        Self::new(motor, gearing, moment_of_inertia, conversion_factor)
    }

    /// Builds the plant from feedforward characterization gains: `kv` in
    /// volts per rad/s and `ka` in volts per rad/s².
    pub fn from_characterization(
        kv: f64,
        ka: f64,
        motor: DcMotor,
        conversion_factor: f64,
    ) -> Result<Self> {
        ensure_positive("kv", kv)?;
        ensure_positive("ka", ka)?;
        Self::from_linear_system(-kv / ka, 1.0 / ka, motor, conversion_factor)
    }

    /// Advances the plant by `dt` seconds with `applied_voltage` held
    /// constant. A non-positive or non-finite `dt` leaves the state untouched.
    ///
    /// Ordinary steps use semi-implicit Euler, split so each substep decays
    /// by at most `MAX_DECAY_PER_SUBSTEP`. Steps too long for that within
    /// `MAX_SUBSTEPS` use the exact zero-order-hold solution instead.
    pub fn integrate(&mut self, applied_voltage: f64, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            trace!("plant ignored non-positive step dt={dt}");
            return;
        }

        let voltage = if applied_voltage.is_finite() {
            applied_voltage
        } else {
            0.0
        };

        let substeps = ((self.a.abs() * dt) / MAX_DECAY_PER_SUBSTEP).ceil().max(1.0);
        if substeps > MAX_SUBSTEPS {
            trace!("plant step dt={dt} solved in closed form");
            self.integrate_exact(voltage, dt);
        } else {
            let h = dt / substeps;
            for _ in 0..substeps as u32 {
                let angular_acceleration = self.a * self.angular_rate + self.b * voltage;
                self.angular_rate += angular_acceleration * h;
                self.angle += self.angular_rate * h;
            }
        }

        self.voltage = voltage;
        self.current = if voltage == 0.0 {
            0.0
        } else {
            self.motor
                .current(self.angular_rate * self.gearing, voltage)
                * voltage.signum()
        };
    }

    // ω(t) = ω∞ + (ω₀ - ω∞)·e^(A·t),  ω∞ = -B·V / A
    fn integrate_exact(&mut self, voltage: f64, dt: f64) {
        let steady = -self.b * voltage / self.a;
        let transient = self.angular_rate - steady;
        let decay = (self.a * dt).exp_m1();
        self.angle += steady * dt + transient * decay / self.a;
        self.angular_rate = steady + transient * (decay + 1.0);
    }

    pub fn position(&self) -> f64 {
        self.angle * self.conversion_factor
    }

    pub fn velocity(&self) -> f64 {
        self.angular_rate * self.conversion_factor
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    pub fn state(&self) -> ActuatorState {
        ActuatorState {
            position: self.position(),
            velocity: self.velocity(),
            current: self.current,
            voltage: self.voltage,
        }
    }

    pub fn motor(&self) -> &DcMotor {
        &self.motor
    }

    pub fn gearing(&self) -> f64 {
        self.gearing
    }

    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    pub fn conversion_factor(&self) -> f64 {
        self.conversion_factor
    }

    /// `(A, B)` of the mechanism-side system in radians.
    pub fn linear_system(&self) -> (f64, f64) {
        (self.a, self.b)
    }
}

fn ensure_conversion(conversion_factor: f64) -> Result<f64> {
    ensure_finite("conversion_factor", conversion_factor)?;
    if conversion_factor == 0.0 {
        return Err(SimError::InvalidParameter {
            name: "conversion_factor",
            value: conversion_factor,
            reason: "must not be zero",
        });
    }
    Ok(conversion_factor)
}
