//! Unit tests for configuration validation.

use stepper_joint::config::{parse_config, validate_config, MechanismConfig};
use stepper_joint::error::{ConfigError, Error};

fn parse(toml_str: &str) -> MechanismConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[joints.elbow]
name = "Elbow"
steps_per_unit = 819.2
min_limit = -1.57
max_limit = 1.57

[joints.elbow.limit_switch]
approach = "positive"
reference_position = 1.57
"#,
    );

    assert!(validate_config(&config).is_ok());
}

/// Test validation fails when neither conversion form is given.
#[test]
fn test_missing_conversion() {
    let config = parse(
        r#"
[joints.elbow]
name = "Elbow"
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::AmbiguousConversion(_)))
    ));
}

/// Test validation fails when both conversion forms are given.
#[test]
fn test_both_conversions() {
    let config = parse(
        r#"
[joints.elbow]
name = "Elbow"
steps_per_unit = 819.2

[joints.elbow.gearbox]
microsteps = 16
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::AmbiguousConversion(_)))
    ));
}

/// Test validation fails for inverted soft limits.
#[test]
fn test_invalid_soft_limits() {
    let result = parse_config(
        r#"
[joints.elbow]
name = "Elbow"
steps_per_unit = 819.2
min_limit = 1.0
max_limit = -1.0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidSoftLimits { .. }))
    ));
}

/// Test validation fails for a switch reference outside the limits.
#[test]
fn test_reference_out_of_bounds() {
    let result = parse_config(
        r#"
[joints.elbow]
name = "Elbow"
steps_per_unit = 819.2
min_limit = -1.0
max_limit = 1.0

[joints.elbow.limit_switch]
approach = "negative"
reference_position = -1.57
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReferenceOutOfBounds { .. }))
    ));
}

/// Test validation fails for a zero homing increment.
#[test]
fn test_zero_homing_increment() {
    let result = parse_config(
        r#"
[joints.elbow]
name = "Elbow"
steps_per_unit = 819.2

[joints.elbow.limit_switch]
approach = "negative"
reference_position = 0.0
homing_increment = 0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidHomingIncrement(0)))
    ));
}

/// Test validation fails for a zero gear ratio.
#[test]
fn test_zero_gear_ratio() {
    let result = parse_config(
        r#"
[joints.elbow]
name = "Elbow"

[joints.elbow.gearbox]
gear_ratio = 0.0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidGearRatio(_)))
    ));
}

/// Test validation fails for zero driver current.
#[test]
fn test_zero_current() {
    let result = parse_config(
        r#"
[joints.elbow]
name = "Elbow"
steps_per_unit = 819.2

[joints.elbow.tuning]
current_ma = 0
"#,
    );

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidCurrent(0)))
    ));
}
