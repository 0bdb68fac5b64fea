//! Unit and sign types shared by joint configuration.
//!
//! Joint positions are plain `f64` values in whatever unit the joint was
//! configured with; these types pin down the pieces that must not be mixed up:
//! microstep divisors, rotation units, and direction signs.

use core::f64::consts::TAU;

use serde::Deserialize;

use crate::error::ConfigError;

/// Microstep divisor (1, 2, 4, 8, 16, 32, 64, 128, 256).
///
/// Validated at construction to be a power of 2 within the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Microsteps(u16);

impl Microsteps {
    /// Full step (no microstepping).
    pub const FULL: Self = Self(1);
    /// Sixteenth step.
    pub const SIXTEENTH: Self = Self(16);
    /// 256th step (maximum resolution).
    pub const TWO_FIFTY_SIXTH: Self = Self(256);

    /// Valid microstep values.
    const VALID_VALUES: [u16; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

    /// Create a new Microsteps value with validation.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidMicrosteps` if the value is not a valid power of 2.
    pub fn new(value: u16) -> Result<Self, ConfigError> {
        if Self::VALID_VALUES.contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfigError::InvalidMicrosteps(value))
        }
    }

    /// Get the raw divisor value.
    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Microsteps {
    fn default() -> Self {
        Self::TWO_FIFTY_SIXTH
    }
}

impl TryFrom<u16> for Microsteps {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Microsteps {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        Microsteps::new(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}

/// Physical unit a rotary joint's position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationUnit {
    /// Radians (2π per output revolution).
    #[default]
    Radians,
    /// Degrees (360 per output revolution).
    Degrees,
    /// Whole output revolutions.
    Revolutions,
}

impl RotationUnit {
    /// Units in one full output revolution.
    #[inline]
    pub fn per_revolution(self) -> f64 {
        match self {
            RotationUnit::Radians => TAU,
            RotationUnit::Degrees => 360.0,
            RotationUnit::Revolutions => 1.0,
        }
    }
}

/// Sign of travel along a joint, in step space.
///
/// Used both for the joint's direction sign (does increasing step count
/// increase position) and for the limit switch approach direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Increasing step count.
    #[default]
    Positive,
    /// Decreasing step count.
    Negative,
}

impl Direction {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Positive => 1,
            Direction::Negative => -1,
        }
    }

    /// Whether travel from `from` to `to` heads this way.
    #[inline]
    pub fn heads_toward(self, from: i32, to: i32) -> bool {
        match self {
            Direction::Positive => to > from,
            Direction::Negative => to < from,
        }
    }
}

/// Logic level a binary sensor reads when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Triggered when the pin reads high.
    #[default]
    High,
    /// Triggered when the pin reads low (e.g. normally-open switch to GND with pull-up).
    Low,
}

impl Level {
    /// Whether a raw pin reading matches this level.
    #[inline]
    pub fn matches(self, is_high: bool) -> bool {
        match self {
            Level::High => is_high,
            Level::Low => !is_high,
        }
    }
}
