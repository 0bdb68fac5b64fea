//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{JointConfig, MechanismConfig};

/// Validate a mechanism configuration.
///
/// Checks every joint with [`validate_joint`].
pub fn validate_config(config: &MechanismConfig) -> Result<()> {
    for (_, joint) in config.joints.iter() {
        validate_joint(joint)?;
    }

    Ok(())
}

/// Validate a single joint configuration.
///
/// Checks:
/// - Exactly one conversion form, yielding a finite positive steps-per-unit
/// - Gear ratio is positive (gearbox form)
/// - Soft limits are valid (min < max)
/// - Limit switch reference lies within the soft limits
/// - Homing increment and iteration cap are positive
/// - Tuning current is positive
pub fn validate_joint(config: &JointConfig) -> Result<()> {
    if let Some(ref gearbox) = config.gearbox {
        if gearbox.gear_ratio.is_nan() || gearbox.gear_ratio <= 0.0 {
            return Err(Error::Config(ConfigError::InvalidGearRatio(gearbox.gear_ratio)));
        }
    }

    config.steps_per_unit()?;

    let limits = config.limits();
    if !limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidSoftLimits {
            min: limits.min,
            max: limits.max,
        }));
    }

    if let Some(ref switch) = config.limit_switch {
        if !limits.contains(switch.reference_position) {
            return Err(Error::Config(ConfigError::ReferenceOutOfBounds {
                reference: switch.reference_position,
                min: limits.min,
                max: limits.max,
            }));
        }

        if switch.homing_increment == 0 {
            return Err(Error::Config(ConfigError::InvalidHomingIncrement(
                switch.homing_increment,
            )));
        }

        if switch.max_homing_iterations == 0 {
            return Err(Error::Config(ConfigError::InvalidHomingIterations(
                switch.max_homing_iterations,
            )));
        }
    }

    if config.tuning.current_ma == 0 {
        return Err(Error::Config(ConfigError::InvalidCurrent(config.tuning.current_ma)));
    }

    Ok(())
}
