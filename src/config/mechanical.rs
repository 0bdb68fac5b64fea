//! Gearbox parameters for deriving the step/position conversion factor.

use serde::Deserialize;

use super::units::{Microsteps, RotationUnit};

/// Drive train between the motor shaft and the joint output.
///
/// An alternative to configuring `steps_per_unit` directly.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Gearbox {
    /// Full motor steps per motor revolution (typically 200 for 1.8° motors).
    #[serde(default = "default_full_steps")]
    pub full_steps_per_revolution: u16,

    /// Microstep setting programmed into the driver.
    #[serde(default)]
    pub microsteps: Microsteps,

    /// Gear ratio (motor revolutions per output revolution, e.g. 5.0 for 5:1 reduction).
    #[serde(default = "default_gear_ratio")]
    pub gear_ratio: f64,

    /// Unit the joint position is expressed in.
    #[serde(default)]
    pub unit: RotationUnit,
}

fn default_full_steps() -> u16 {
    200
}

fn default_gear_ratio() -> f64 {
    1.0
}

impl Gearbox {
    /// Microsteps per output revolution (full steps × microsteps × gear ratio).
    pub fn microsteps_per_revolution(&self) -> f64 {
        self.full_steps_per_revolution as f64 * self.microsteps.value() as f64 * self.gear_ratio
    }

    /// Microsteps per unit of joint position.
    pub fn steps_per_unit(&self) -> f64 {
        self.microsteps_per_revolution() / self.unit.per_revolution()
    }
}

impl Default for Gearbox {
    fn default() -> Self {
        Self {
            full_steps_per_revolution: default_full_steps(),
            microsteps: Microsteps::default(),
            gear_ratio: default_gear_ratio(),
            unit: RotationUnit::default(),
        }
    }
}
