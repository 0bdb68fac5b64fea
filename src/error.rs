//! Error types for stepper-joint.
//!
//! Configuration problems are reported while loading or building; joint errors
//! are returned synchronously from controller operations.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for joint controller operations.
pub type JointResult<T> = core::result::Result<T, JointError>;

/// Unified error type for all stepper-joint operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Joint controller error
    Joint(JointError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep value (must be power of 2: 1, 2, 4, 8, 16, 32, 64, 128, 256)
    InvalidMicrosteps(u16),
    /// Invalid gear ratio (must be > 0)
    InvalidGearRatio(f64),
    /// Invalid steps per unit (must be finite and > 0)
    InvalidStepsPerUnit(f64),
    /// Joint declares both `steps_per_unit` and a gearbox, or neither
    AmbiguousConversion(heapless::String<32>),
    /// Invalid soft limits (min must be < max)
    InvalidSoftLimits {
        /// Minimum limit value
        min: f64,
        /// Maximum limit value
        max: f64,
    },
    /// Limit switch reference position lies outside the soft limits
    ReferenceOutOfBounds {
        /// Configured reference position
        reference: f64,
        /// Joint's min limit
        min: f64,
        /// Joint's max limit
        max: f64,
    },
    /// Homing increment must be > 0
    InvalidHomingIncrement(u16),
    /// Homing iteration cap must be > 0
    InvalidHomingIterations(u32),
    /// Motor current must be > 0
    InvalidCurrent(u16),
    /// Joint name not found in configuration
    JointNotFound(heapless::String<32>),
    /// Builder is missing a required part
    MissingField(&'static str),
    /// Limit switch pin supplied without a limit switch config, or the reverse
    SensorMismatch(heapless::String<32>),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Fatal driver condition detected while reading back health after reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverFault {
    /// Driver did not answer on the bus (version read back as 0x00/0xFF).
    CommunicationFailure,
    /// Driver is strapped for a different control protocol (step/dir).
    WrongControlMode,
    /// Driver reports its hardware enable input as inactive.
    HardwareDisabled,
}

/// Joint controller errors.
#[derive(Debug, Clone, PartialEq)]
pub enum JointError {
    /// Setup found the driver unusable; the joint is now faulted
    Fatal(DriverFault),
    /// Joint faulted during setup and refuses further commands
    Faulted(DriverFault),
    /// Requested position is outside the soft limits
    OutOfBounds {
        /// Requested position
        position: f64,
        /// Joint's min limit
        min: f64,
        /// Joint's max limit
        max: f64,
    },
    /// Homing did not reach the limit switch within the iteration cap
    CalibrationTimeout {
        /// Iterations performed before giving up
        iterations: u32,
    },
    /// Operation invoked in the wrong lifecycle state
    InvalidState(&'static str),
    /// GPIO pin operation failed
    PinError,
    /// Driver bus transaction failed
    Bus,
}

impl JointError {
    /// Whether this error permanently disables the joint.
    pub fn is_fatal(&self) -> bool {
        matches!(self, JointError::Fatal(_) | JointError::Faulted(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Joint(e) => write!(f, "Joint error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidMicrosteps(v) => {
                write!(f, "Invalid microsteps: {}. Valid values: 1, 2, 4, 8, 16, 32, 64, 128, 256", v)
            }
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidStepsPerUnit(v) => {
                write!(f, "Invalid steps per unit: {}. Must be finite and > 0", v)
            }
            ConfigError::AmbiguousConversion(name) => write!(
                f,
                "Joint '{}' must set exactly one of steps_per_unit or gearbox",
                name
            ),
            ConfigError::InvalidSoftLimits { min, max } => {
                write!(f, "Invalid soft limits: min ({}) must be < max ({})", min, max)
            }
            ConfigError::ReferenceOutOfBounds { reference, min, max } => write!(
                f,
                "Limit switch reference {} lies outside limits [{}, {}]",
                reference, min, max
            ),
            ConfigError::InvalidHomingIncrement(v) => {
                write!(f, "Invalid homing increment: {}. Must be > 0", v)
            }
            ConfigError::InvalidHomingIterations(v) => {
                write!(f, "Invalid homing iteration cap: {}. Must be > 0", v)
            }
            ConfigError::InvalidCurrent(v) => write!(f, "Invalid motor current: {} mA. Must be > 0", v),
            ConfigError::JointNotFound(name) => write!(f, "Joint '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::SensorMismatch(name) => write!(
                f,
                "Joint '{}': limit switch pin and limit switch config must be given together",
                name
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverFault::CommunicationFailure => write!(f, "driver communication error"),
            DriverFault::WrongControlMode => write!(f, "driver is configured for step/dir mode"),
            DriverFault::HardwareDisabled => write!(f, "driver is not hardware enabled"),
        }
    }
}

impl fmt::Display for JointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JointError::Fatal(fault) => write!(f, "Fatal driver error: {}", fault),
            JointError::Faulted(fault) => write!(f, "Joint is faulted ({})", fault),
            JointError::OutOfBounds { position, min, max } => {
                write!(f, "Position {} exceeds limits [{}, {}]", position, min, max)
            }
            JointError::CalibrationTimeout { iterations } => {
                write!(f, "Limit switch not reached after {} homing iterations", iterations)
            }
            JointError::InvalidState(msg) => write!(f, "Invalid joint state: {}", msg),
            JointError::PinError => write!(f, "GPIO pin operation failed"),
            JointError::Bus => write!(f, "Driver bus transaction failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<JointError> for Error {
    fn from(e: JointError) -> Self {
        Error::Joint(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for JointError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverFault {}
