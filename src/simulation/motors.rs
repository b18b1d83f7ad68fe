//! Brushless DC motor constants.
//!
//! A [`DcMotor`] is derived from four datasheet figures measured at the
//! nominal voltage: stall torque, stall current, free current and free speed.
//! Ganging `count` identical motors on one shaft multiplies torque and
//! currents while the free speed stays the same.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ensure_non_negative, ensure_positive};
use crate::core::SimError;

const RPM_TO_RAD_PER_SEC: f64 = std::f64::consts::TAU / 60.0;

/// Motors with published curves.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotorKind {
    Falcon500,
    Falcon500Foc,
    KrakenX60,
    KrakenX60Foc,
}

impl MotorKind {
    /// `(stall torque Nm, stall current A, free current A, free speed rpm)`
    /// at 12 V for a single motor.
    fn datasheet(self) -> (f64, f64, f64, f64) {
        match self {
            MotorKind::Falcon500 => (4.69, 257.0, 1.5, 6380.0),
            MotorKind::Falcon500Foc => (5.84, 304.0, 1.5, 6080.0),
            MotorKind::KrakenX60 => (7.09, 366.0, 2.0, 6000.0),
            MotorKind::KrakenX60Foc => (9.37, 483.0, 2.0, 5800.0),
        }
    }

    pub fn motor(self, count: u32) -> Result<DcMotor> {
        let (stall_torque, stall_current, free_current, free_speed_rpm) = self.datasheet();
        DcMotor::new(
            12.0,
            stall_torque,
            stall_current,
            free_current,
            free_speed_rpm * RPM_TO_RAD_PER_SEC,
            count,
        )
    }
}

/// Datasheet figures for a motor that is not in [`MotorKind`].
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MotorConstants {
    pub nominal_voltage: f64,
    pub stall_torque: f64,
    pub stall_current: f64,
    pub free_current: f64,
    /// Free speed in rad/s.
    pub free_speed: f64,
}

/// Electrical and torque constants of one or more ganged DC motors.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct DcMotor {
    pub nominal_voltage: f64,
    pub stall_torque: f64,
    pub stall_current: f64,
    pub free_current: f64,
    pub free_speed: f64,
    /// Winding resistance (Ohm).
    pub resistance: f64,
    /// Velocity constant (rad/s per volt).
    pub kv: f64,
    /// Torque constant (Nm per amp).
    pub kt: f64,
}

impl DcMotor {
    pub fn new(
        nominal_voltage: f64,
        stall_torque: f64,
        stall_current: f64,
        free_current: f64,
        free_speed: f64,
        count: u32,
    ) -> Result<Self> {
        ensure_positive("nominal_voltage", nominal_voltage)?;
        ensure_positive("stall_torque", stall_torque)?;
        ensure_positive("stall_current", stall_current)?;
        ensure_non_negative("free_current", free_current)?;
        ensure_positive("free_speed", free_speed)?;
        if count == 0 {
            return Err(SimError::InvalidParameter {
                name: "motor_count",
                value: 0.0,
                reason: "at least one motor is required",
            });
        }

        let n = f64::from(count);
        let stall_torque = stall_torque * n;
        let stall_current = stall_current * n;
        let free_current = free_current * n;

        let resistance = nominal_voltage / stall_current;
        let back_emf_headroom = nominal_voltage - resistance * free_current;
        let kv = free_speed / ensure_positive("free_current", back_emf_headroom)?;
        let kt = stall_torque / stall_current;

        Ok(Self {
            nominal_voltage,
            stall_torque,
            stall_current,
            free_current,
            free_speed,
            resistance,
            kv,
            kt,
        })
    }

    pub fn from_constants(constants: &MotorConstants, count: u32) -> Result<Self> {
        Self::new(
            constants.nominal_voltage,
            constants.stall_torque,
            constants.stall_current,
            constants.free_current,
            constants.free_speed,
            count,
        )
    }

    /// Current drawn at a given rotor speed (rad/s) and terminal voltage.
    pub fn current(&self, speed: f64, voltage: f64) -> f64 {
        -speed / self.kv / self.resistance + voltage / self.resistance
    }

    /// Torque produced for a given current.
    pub fn torque(&self, current: f64) -> f64 {
        current * self.kt
    }
}
