//! Stepper driver seam.
//!
//! The controller talks to the physical driver only through [`DriverAdapter`].
//! Register framing for a particular chip lives in an implementation of this
//! trait; [`sim`] provides an in-memory one for tests and demos.

pub mod sim;

pub use crate::config::DriverTuning;

/// Health and mode report read back from the driver after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverStatus {
    /// Driver answered on the bus with a plausible identity.
    pub comms_ok: bool,
    /// Driver is strapped for the serial (ramp generator) control mode.
    pub control_mode_ok: bool,
    /// Driver's hardware enable input is active.
    pub hardware_enabled: bool,
}

impl DriverStatus {
    /// A status with every check passing.
    pub const HEALTHY: Self = Self {
        comms_ok: true,
        control_mode_ok: true,
        hardware_enabled: true,
    };

    /// First fatal condition in the report, checked in bus, mode, enable order.
    pub fn fault(&self) -> Option<crate::error::DriverFault> {
        use crate::error::DriverFault;

        if !self.comms_ok {
            Some(DriverFault::CommunicationFailure)
        } else if !self.control_mode_ok {
            Some(DriverFault::WrongControlMode)
        } else if !self.hardware_enabled {
            Some(DriverFault::HardwareDisabled)
        } else {
            None
        }
    }
}

/// A microstepping driver with an onboard ramp generator.
///
/// Step counts are the driver's absolute position registers: `actual` tracks
/// the physical motor, `target` is where the ramp generator is heading.
pub trait DriverAdapter {
    /// Bus error type.
    type Error: core::fmt::Debug;

    /// Read the driver's actual position.
    fn read_actual_steps(&mut self) -> Result<i32, Self::Error>;

    /// Read the commanded target position.
    fn read_target_steps(&mut self) -> Result<i32, Self::Error>;

    /// Command a new absolute target position.
    fn write_target_steps(&mut self, steps: i32) -> Result<(), Self::Error>;

    /// Reset the driver to power-up defaults and start communication.
    fn reset_and_begin(&mut self) -> Result<(), Self::Error>;

    /// Read back health and mode.
    fn read_health_status(&mut self) -> Result<DriverStatus, Self::Error>;

    /// Push current, speed and acceleration.
    fn write_tuning(&mut self, tuning: &DriverTuning) -> Result<(), Self::Error>;
}

impl<T: DriverAdapter + ?Sized> DriverAdapter for &mut T {
    type Error = T::Error;

    fn read_actual_steps(&mut self) -> Result<i32, Self::Error> {
        T::read_actual_steps(self)
    }

    fn read_target_steps(&mut self) -> Result<i32, Self::Error> {
        T::read_target_steps(self)
    }

    fn write_target_steps(&mut self, steps: i32) -> Result<(), Self::Error> {
        T::write_target_steps(self, steps)
    }

    fn reset_and_begin(&mut self) -> Result<(), Self::Error> {
        T::reset_and_begin(self)
    }

    fn read_health_status(&mut self) -> Result<DriverStatus, Self::Error> {
        T::read_health_status(self)
    }

    fn write_tuning(&mut self, tuning: &DriverTuning) -> Result<(), Self::Error> {
        T::write_tuning(self, tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DriverFault;

    #[test]
    fn test_fault_precedence() {
        let status = DriverStatus {
            comms_ok: false,
            control_mode_ok: false,
            hardware_enabled: false,
        };
        assert_eq!(status.fault(), Some(DriverFault::CommunicationFailure));

        let status = DriverStatus {
            control_mode_ok: false,
            ..DriverStatus::HEALTHY
        };
        assert_eq!(status.fault(), Some(DriverFault::WrongControlMode));

        let status = DriverStatus {
            hardware_enabled: false,
            ..DriverStatus::HEALTHY
        };
        assert_eq!(status.fault(), Some(DriverFault::HardwareDisabled));

        assert_eq!(DriverStatus::HEALTHY.fault(), None);
    }
}
