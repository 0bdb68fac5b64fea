//! Limit switch runtime state.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use super::bounds::MotionBounds;
use crate::config::LimitSwitchConfig;
use crate::error::{JointError, JointResult};

/// Homing sensor of a joint: either absent, or a pin with its configuration
/// and the step offset established by calibration.
#[derive(Debug)]
pub enum LimitSensor<SW> {
    /// No switch fitted; offset is permanently zero.
    Detached,
    /// Switch fitted.
    Attached {
        /// Sensor input.
        pin: SW,
        /// Switch configuration.
        config: LimitSwitchConfig,
        /// Step count at which position reads zero; meaningful once `calibrated`.
        offset: i32,
        /// Calibration has completed in this power cycle.
        calibrated: bool,
    },
}

impl<SW: InputPin> LimitSensor<SW> {
    /// An attached, not yet calibrated switch.
    pub fn attached(pin: SW, config: LimitSwitchConfig) -> Self {
        LimitSensor::Attached {
            pin,
            config,
            offset: 0,
            calibrated: false,
        }
    }

    /// Whether a switch is fitted.
    #[inline]
    pub fn is_attached(&self) -> bool {
        matches!(self, LimitSensor::Attached { .. })
    }

    /// Switch configuration, if attached.
    #[inline]
    pub fn config(&self) -> Option<&LimitSwitchConfig> {
        match self {
            LimitSensor::Detached => None,
            LimitSensor::Attached { config, .. } => Some(config),
        }
    }

    /// Current step offset (zero until calibrated, always zero when detached).
    #[inline]
    pub fn offset(&self) -> i32 {
        match self {
            LimitSensor::Detached => 0,
            LimitSensor::Attached { offset, .. } => *offset,
        }
    }

    /// Whether position readings are anchored to the switch.
    ///
    /// Detached joints are trivially calibrated.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        match self {
            LimitSensor::Detached => true,
            LimitSensor::Attached { calibrated, .. } => *calibrated,
        }
    }

    /// Whether the switch reads its triggered level. Always false when detached.
    pub fn is_pressed(&mut self) -> JointResult<bool> {
        match self {
            LimitSensor::Detached => Ok(false),
            LimitSensor::Attached { pin, config, .. } => {
                let high = pin.is_high().map_err(|_| JointError::PinError)?;
                Ok(config.triggered_level.matches(high))
            }
        }
    }

    /// Pre-check independent of the live switch: true if detached, otherwise
    /// whether `position` lies within `bounds`.
    pub fn is_valid(&self, position: f64, bounds: &MotionBounds) -> bool {
        !self.is_attached() || bounds.validate(position).is_ok()
    }

    /// Record the offset found by homing.
    pub(crate) fn set_offset(&mut self, new_offset: i32) {
        if let LimitSensor::Attached {
            offset, calibrated, ..
        } = self
        {
            *offset = new_offset;
            *calibrated = true;
        }
    }

    /// Drop the offset after the driver's position registers were reset.
    pub(crate) fn forget_calibration(&mut self) {
        if let LimitSensor::Attached {
            offset, calibrated, ..
        } = self
        {
            *offset = 0;
            *calibrated = false;
        }
    }
}

/// Placeholder pin for joints built without a limit switch.
///
/// Never read: a joint holding it is always [`LimitSensor::Detached`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSwitch;

impl ErrorType for NoSwitch {
    type Error = Infallible;
}

impl InputPin for NoSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}
