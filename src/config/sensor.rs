//! Limit switch (homing sensor) configuration.

use serde::Deserialize;

use super::units::{Direction, Level};

/// Configuration of a joint's homing limit switch.
///
/// Presence of this section means the joint has a switch attached; a joint
/// without one simply omits it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LimitSwitchConfig {
    /// Pin level that means "pressed".
    #[serde(default)]
    pub triggered_level: Level,

    /// Step direction to travel to reach the switch.
    pub approach: Direction,

    /// Joint position the switch marks.
    pub reference_position: f64,

    /// Whether reaching the switch during normal motion forces a stop.
    #[serde(default = "default_blocking")]
    pub blocking: bool,

    /// Steps commanded per homing iteration.
    #[serde(default = "default_homing_increment")]
    pub homing_increment: u16,

    /// Homing iterations before calibration gives up.
    #[serde(default = "default_max_homing_iterations")]
    pub max_homing_iterations: u32,
}

fn default_blocking() -> bool {
    true
}

fn default_homing_increment() -> u16 {
    10
}

fn default_max_homing_iterations() -> u32 {
    100_000
}

impl LimitSwitchConfig {
    /// Create a blocking switch with default homing parameters.
    pub fn new(triggered_level: Level, approach: Direction, reference_position: f64) -> Self {
        Self {
            triggered_level,
            approach,
            reference_position,
            blocking: default_blocking(),
            homing_increment: default_homing_increment(),
            max_homing_iterations: default_max_homing_iterations(),
        }
    }

    /// Set whether the switch blocks motion toward it.
    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    /// Set the homing iteration cap.
    pub fn with_max_homing_iterations(mut self, iterations: u32) -> Self {
        self.max_homing_iterations = iterations;
        self
    }

    /// Signed step delta commanded per homing iteration.
    #[inline]
    pub fn homing_step(&self) -> i32 {
        self.homing_increment as i32 * self.approach.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homing_step_sign() {
        let cfg = LimitSwitchConfig::new(Level::High, Direction::Negative, -1.57);
        assert_eq!(cfg.homing_step(), -10);

        let cfg = LimitSwitchConfig::new(Level::Low, Direction::Positive, 1.57);
        assert_eq!(cfg.homing_step(), 10);
        assert!(cfg.blocking);
    }
}
