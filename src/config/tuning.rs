//! Driver tuning parameters.

use serde::Deserialize;

/// Tuning values pushed to the driver after a successful setup.
///
/// These are passed through opaquely; their scale is whatever the driver's
/// ramp generator expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverTuning {
    /// RMS motor current in milliamps.
    pub current_ma: u16,

    /// Ramp generator maximum velocity.
    pub speed: u32,

    /// Ramp generator acceleration and deceleration.
    pub acceleration: u32,
}

impl Default for DriverTuning {
    fn default() -> Self {
        Self {
            current_ma: 1000,
            speed: 100_000,
            acceleration: 10_000,
        }
    }
}
