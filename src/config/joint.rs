//! Joint configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::SoftLimits;
use super::mechanical::Gearbox;
use super::sensor::LimitSwitchConfig;
use super::tuning::DriverTuning;
use super::units::Direction;
use crate::error::ConfigError;

/// Complete joint configuration.
///
/// Immutable once loaded; calibration state lives on the controller.
#[derive(Debug, Clone, Deserialize)]
pub struct JointConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Microsteps per unit of joint position.
    ///
    /// Mutually exclusive with `gearbox`.
    #[serde(default)]
    pub steps_per_unit: Option<f64>,

    /// Gearbox description the conversion factor is derived from.
    #[serde(default)]
    pub gearbox: Option<Gearbox>,

    /// Negate the step/position relationship (direction sign -1).
    #[serde(default)]
    pub invert_direction: bool,

    /// Minimum position; unbounded when omitted.
    #[serde(default = "neg_infinity")]
    pub min_limit: f64,

    /// Maximum position; unbounded when omitted.
    #[serde(default = "infinity")]
    pub max_limit: f64,

    /// Driver tuning values.
    #[serde(default)]
    pub tuning: DriverTuning,

    /// Optional homing limit switch.
    #[serde(default)]
    pub limit_switch: Option<LimitSwitchConfig>,
}

/// Copy `name` into a 32-byte name, truncating at a character boundary.
pub(crate) fn bounded_name(name: &str) -> String<32> {
    let mut bounded = String::new();
    for c in name.chars() {
        if bounded.push(c).is_err() {
            break;
        }
    }
    bounded
}

fn neg_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn infinity() -> f64 {
    f64::INFINITY
}

impl JointConfig {
    /// Create a sensor-less, unbounded joint with an explicit conversion factor.
    pub fn new(name: &str, steps_per_unit: f64) -> Self {
        Self {
            name: bounded_name(name),
            steps_per_unit: Some(steps_per_unit),
            gearbox: None,
            invert_direction: false,
            min_limit: neg_infinity(),
            max_limit: infinity(),
            tuning: DriverTuning::default(),
            limit_switch: None,
        }
    }

    /// Set soft limits.
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.min_limit = min;
        self.max_limit = max;
        self
    }

    /// Set direction inversion.
    pub fn with_inverted_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Attach a limit switch.
    pub fn with_limit_switch(mut self, switch: LimitSwitchConfig) -> Self {
        self.limit_switch = Some(switch);
        self
    }

    /// Set driver tuning.
    pub fn with_tuning(mut self, tuning: DriverTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Resolve the conversion factor from whichever form was configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AmbiguousConversion` unless exactly one of
    /// `steps_per_unit` and `gearbox` is set, and
    /// `ConfigError::InvalidStepsPerUnit` if the result is not finite and positive.
    pub fn steps_per_unit(&self) -> Result<f64, ConfigError> {
        let spu = match (self.steps_per_unit, self.gearbox.as_ref()) {
            (Some(spu), None) => spu,
            (None, Some(gearbox)) => gearbox.steps_per_unit(),
            _ => return Err(ConfigError::AmbiguousConversion(self.name.clone())),
        };

        if spu.is_finite() && spu > 0.0 {
            Ok(spu)
        } else {
            Err(ConfigError::InvalidStepsPerUnit(spu))
        }
    }

    /// Direction sign of the step/position relationship.
    #[inline]
    pub fn direction(&self) -> Direction {
        if self.invert_direction {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }

    /// Soft limits as a value.
    #[inline]
    pub fn limits(&self) -> SoftLimits {
        SoftLimits::new(self.min_limit, self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::units::{Microsteps, RotationUnit};

    #[test]
    fn test_explicit_steps_per_unit() {
        let config = JointConfig::new("wrist", 819.2);
        assert_eq!(config.steps_per_unit(), Ok(819.2));
        assert_eq!(config.direction(), Direction::Positive);
        assert!(config.limits().contains(1.0e9));
    }

    #[test]
    fn test_gearbox_steps_per_unit() {
        let mut config = JointConfig::new("elbow", 1.0);
        config.steps_per_unit = None;
        config.gearbox = Some(Gearbox {
            full_steps_per_revolution: 200,
            microsteps: Microsteps::SIXTEENTH,
            gear_ratio: 2.0,
            unit: RotationUnit::Revolutions,
        });

        // 200 * 16 * 2.0 = 6400
        assert_eq!(config.steps_per_unit(), Ok(6400.0));
    }

    #[test]
    fn test_ambiguous_conversion() {
        let mut config = JointConfig::new("elbow", 819.2);
        config.gearbox = Some(Gearbox::default());
        assert!(matches!(
            config.steps_per_unit(),
            Err(ConfigError::AmbiguousConversion(_))
        ));

        config.steps_per_unit = None;
        config.gearbox = None;
        assert!(matches!(
            config.steps_per_unit(),
            Err(ConfigError::AmbiguousConversion(_))
        ));
    }

    #[test]
    fn test_long_name_is_truncated() {
        let config = JointConfig::new("left_shoulder_pitch_joint_actuator_7", 819.2);
        assert_eq!(config.name.as_str(), "left_shoulder_pitch_joint_actuat");

        // Multi-byte characters are never split.
        let config = JointConfig::new("épaule_gauche_articulation_tangage", 819.2);
        assert!(config.name.len() <= 32);
        assert!("épaule_gauche_articulation_tangage".starts_with(config.name.as_str()));
    }

    #[test]
    fn test_inverted_direction() {
        let config = JointConfig::new("base", 100.0).with_inverted_direction(true);
        assert_eq!(config.direction(), Direction::Negative);
    }
}
