//! Joint module for stepper-joint.
//!
//! Provides the joint controller together with its leaf components: unit
//! conversion, soft-limit validation and the homing sensor.

mod bounds;
mod builder;
mod controller;
mod converter;
mod sensor;
mod state;

pub use bounds::MotionBounds;
pub use builder::JointControllerBuilder;
pub use controller::JointController;
pub use converter::UnitConverter;
pub use sensor::{LimitSensor, NoSwitch};
pub use state::{JointState, SafetyStop, StopReason};
