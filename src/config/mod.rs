//! Configuration module for stepper-joint.
//!
//! Provides types for loading and validating joint configurations from TOML
//! files (with `std` feature) or constructing them in code.

mod joint;
mod limits;
mod mechanical;
mod sensor;
mod system;
mod tuning;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use joint::JointConfig;
pub(crate) use joint::bounded_name;
pub use limits::SoftLimits;
pub use mechanical::Gearbox;
pub use sensor::LimitSwitchConfig;
pub use system::MechanismConfig;
pub use tuning::DriverTuning;
pub use validation::{validate_config, validate_joint};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Direction, Level, Microsteps, RotationUnit};
