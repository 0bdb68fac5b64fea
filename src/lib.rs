//! # stepper-joint
//!
//! Homed, soft-limited joint control for microstepping drivers with an onboard
//! ramp generator, with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Configuration-driven**: Define joints, limit switches and tuning in TOML files
//! - **embedded-hal 1.0**: Uses `InputPin` for the limit switch, `OutputPin` for
//!   the bus select and enable lines, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Homing**: Iteration-bounded calibration against a limit switch
//! - **Safety interlock**: Per-tick stop when driving into a pressed switch
//! - **Driver seam**: Chip register framing lives behind [`DriverAdapter`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_joint::{JointControllerBuilder, MechanismConfig};
//!
//! // Load configuration from TOML
//! let config: MechanismConfig = stepper_joint::load_config("mechanism.toml")?;
//!
//! // Create a joint with embedded-hal pins and a driver adapter
//! let mut shoulder = JointControllerBuilder::new()
//!     .from_config(&config, "shoulder")?
//!     .driver(driver)
//!     .select_pin(cs_pin)
//!     .enable_pin(en_pin)
//!     .delay(delay)
//!     .limit_switch(switch_pin)
//!     .build()?;
//!
//! shoulder.presetup()?; // on every joint first
//! shoulder.setup()?;
//! shoulder.calibrate()?;
//!
//! shoulder.move_to(0.5)?;
//! loop {
//!     shoulder.update()?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// This must go first, so the logging macros are visible to every module.
mod fmt;

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod joint;

// Re-exports for ergonomic API
pub use config::{validate_config, JointConfig, LimitSwitchConfig, MechanismConfig};
pub use driver::{DriverAdapter, DriverStatus, DriverTuning};
pub use error::{ConfigError, DriverFault, Error, JointError, JointResult, Result};
pub use joint::{
    JointController, JointControllerBuilder, JointState, LimitSensor, MotionBounds, NoSwitch,
    SafetyStop, StopReason, UnitConverter,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Direction, Level, Microsteps, RotationUnit};
