//! Step/position conversion.
//!
//! One convention for every joint:
//!
//! ```text
//! position = (steps - offset) / steps_per_unit * sign
//! steps    = round(position * steps_per_unit * sign) + offset
//! ```
//!
//! where `sign` is the joint's direction sign and `offset` the calibrated
//! step count at which position is zero.

use crate::config::units::Direction;

/// Pure conversion between driver step counts and joint position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConverter {
    steps_per_unit: f64,
    direction: Direction,
}

impl UnitConverter {
    /// Create a converter. `steps_per_unit` must be finite and positive.
    #[inline]
    pub const fn new(steps_per_unit: f64, direction: Direction) -> Self {
        Self {
            steps_per_unit,
            direction,
        }
    }

    /// Microsteps per unit of position.
    #[inline]
    pub fn steps_per_unit(&self) -> f64 {
        self.steps_per_unit
    }

    /// Direction sign.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Width of one step in position units.
    #[inline]
    pub fn quantum(&self) -> f64 {
        1.0 / self.steps_per_unit
    }

    /// Convert a step count to a position.
    #[inline]
    pub fn steps_to_position(&self, steps: i32, offset: i32) -> f64 {
        let relative = steps as f64 - offset as f64;
        relative * (1.0 / self.steps_per_unit) * self.direction.sign() as f64
    }

    /// Convert a position to the nearest step count, ties away from zero.
    ///
    /// Results outside the `i32` range saturate.
    #[inline]
    pub fn position_to_steps(&self, position: f64, offset: i32) -> i32 {
        let relative = libm::round(position * self.steps_per_unit * self.direction.sign() as f64);
        (relative as i32).saturating_add(offset)
    }

    /// Offset that makes `steps` read as `position`.
    ///
    /// Exact up to quantization: `steps_to_position(steps, offset)` lands
    /// within half a step of `position`.
    #[inline]
    pub fn offset_for(&self, steps: i32, position: f64) -> i32 {
        steps.saturating_sub(self.position_to_steps(position, 0))
    }
}
