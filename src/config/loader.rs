//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::MechanismConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
///
/// ```rust,ignore
/// use stepper_joint::load_config;
///
/// let config = load_config("arm.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<MechanismConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = heapless::String::try_from(e.to_string().as_str()).unwrap_or_default();
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<MechanismConfig> {
    let config: MechanismConfig = toml::from_str(content).map_err(|e| {
        let msg = heapless::String::try_from(e.message()).unwrap_or_default();
        Error::Config(ConfigError::ParseError(msg))
    })?;

    super::validation::validate_config(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[joints.wrist]
name = "Wrist"
steps_per_unit = 819.2
"#;

        let config = parse_config(toml).unwrap();
        let wrist = config.joint("wrist").unwrap();
        assert_eq!(wrist.steps_per_unit().unwrap(), 819.2);
        assert!(wrist.limit_switch.is_none());
        assert_eq!(wrist.min_limit, f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_with_limit_switch() {
        let toml = r#"
[joints.shoulder]
name = "Shoulder"
steps_per_unit = 819.2
min_limit = -1.57
max_limit = 1.57

[joints.shoulder.limit_switch]
triggered_level = "low"
approach = "negative"
reference_position = -1.57
"#;

        let config = parse_config(toml).unwrap();
        let switch = config.joint("shoulder").unwrap().limit_switch.unwrap();
        assert!(switch.blocking);
        assert_eq!(switch.homing_increment, 10);
        assert_eq!(switch.homing_step(), -10);
    }

    #[test]
    fn test_parse_rejects_invalid_limits() {
        let toml = r#"
[joints.shoulder]
name = "Shoulder"
steps_per_unit = 819.2
min_limit = 1.0
max_limit = -1.0
"#;

        assert!(matches!(
            parse_config(toml),
            Err(Error::Config(ConfigError::InvalidSoftLimits { .. }))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_config("[joints.x]\nname = 3\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::ParseError(_)))));
    }
}
