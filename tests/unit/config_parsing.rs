//! Unit tests for TOML configuration parsing.

use stepper_joint::config::{load_config, parse_config, MechanismConfig};
use stepper_joint::{Direction, DriverTuning, Level, Microsteps, RotationUnit};

const ARM: &str = r#"
[joints.base]
name = "Base"
steps_per_unit = 100.0

[joints.shoulder]
name = "Shoulder"
min_limit = -1.57
max_limit = 1.57

[joints.shoulder.gearbox]
full_steps_per_revolution = 200
microsteps = 256
unit = "radians"

[joints.shoulder.tuning]
current_ma = 1200
speed = 50000
acceleration = 5000

[joints.shoulder.limit_switch]
triggered_level = "low"
approach = "negative"
reference_position = -1.57
homing_increment = 20

[joints.wrist]
name = "Wrist"
steps_per_unit = 4551.1
invert_direction = true
min_limit = -180.0
max_limit = 180.0

[joints.wrist.limit_switch]
approach = "positive"
reference_position = 180.0
blocking = false
"#;

/// Test parsing a sensor-less joint with defaults.
#[test]
fn test_parse_minimal_joint() {
    let config: MechanismConfig = toml::from_str(ARM).expect("Failed to parse TOML");
    let base = config.joint("base").expect("Joint not found");

    assert_eq!(base.name.as_str(), "Base");
    assert_eq!(base.steps_per_unit(), Ok(100.0));
    assert_eq!(base.direction(), Direction::Positive);
    assert!(base.min_limit.is_infinite() && base.min_limit < 0.0);
    assert!(base.max_limit.is_infinite() && base.max_limit > 0.0);
    assert_eq!(base.tuning, DriverTuning::default());
    assert!(base.limit_switch.is_none());
}

/// Test parsing a gearbox joint with a limit switch.
#[test]
fn test_parse_gearbox_and_switch() {
    let config: MechanismConfig = toml::from_str(ARM).expect("Failed to parse TOML");
    let shoulder = config.joint("shoulder").expect("Joint not found");

    let gearbox = shoulder.gearbox.expect("gearbox missing");
    assert_eq!(gearbox.microsteps, Microsteps::TWO_FIFTY_SIXTH);
    assert_eq!(gearbox.gear_ratio, 1.0);
    assert_eq!(gearbox.unit, RotationUnit::Radians);

    // 200 * 256 / 2π
    let spu = shoulder.steps_per_unit().unwrap();
    assert!((spu - 8148.7).abs() < 0.1);

    assert_eq!(shoulder.tuning.current_ma, 1200);
    assert_eq!(shoulder.tuning.speed, 50_000);

    let switch = shoulder.limit_switch.expect("limit switch missing");
    assert_eq!(switch.triggered_level, Level::Low);
    assert_eq!(switch.approach, Direction::Negative);
    assert_eq!(switch.reference_position, -1.57);
    assert!(switch.blocking);
    assert_eq!(switch.homing_increment, 20);
    assert_eq!(switch.max_homing_iterations, 100_000);
    assert_eq!(switch.homing_step(), -20);
}

/// Test switch defaults and direction inversion.
#[test]
fn test_parse_non_blocking_switch() {
    let config: MechanismConfig = toml::from_str(ARM).expect("Failed to parse TOML");
    let wrist = config.joint("wrist").expect("Joint not found");

    assert_eq!(wrist.direction(), Direction::Negative);
    let switch = wrist.limit_switch.expect("limit switch missing");
    assert_eq!(switch.triggered_level, Level::High);
    assert!(!switch.blocking);
    assert_eq!(switch.homing_increment, 10);
}

/// Test that joints keep declaration order.
#[test]
fn test_joint_order() {
    let config = parse_config(ARM).expect("Config should be valid");
    let names: Vec<&str> = config.joint_names().collect();

    assert_eq!(names, ["base", "shoulder", "wrist"]);
}

/// Test rejection of a non power-of-two microstep setting.
#[test]
fn test_invalid_microsteps_rejected() {
    let toml_str = r#"
[joints.base]
name = "Base"

[joints.base.gearbox]
microsteps = 12
"#;

    let result: Result<MechanismConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test rejection of an unknown approach direction.
#[test]
fn test_invalid_direction_rejected() {
    let toml_str = r#"
[joints.base]
name = "Base"
steps_per_unit = 100.0

[joints.base.limit_switch]
approach = "sideways"
reference_position = 0.0
"#;

    assert!(parse_config(toml_str).is_err());
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_joint_load_config_test.toml");
    std::fs::write(&path, ARM).expect("Failed to write config");

    let config = load_config(&path).expect("Config should load");
    assert_eq!(config.joints.len(), 3);

    let _ = std::fs::remove_file(&path);
}

/// Test a missing file is reported as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/stepper_joint.toml");
    assert!(result.is_err());
}
