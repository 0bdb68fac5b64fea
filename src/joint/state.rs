//! Joint lifecycle state and stop bookkeeping.

use crate::error::DriverFault;

/// Lifecycle of a joint controller.
///
/// `Faulted` is terminal: a joint that failed its setup health check never
/// accepts commands again in this power cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JointState {
    /// Constructed; select line not yet claimed.
    #[default]
    Uninitialized,
    /// `presetup` has claimed the select line.
    Claimed,
    /// Driver programmed and healthy.
    Ready {
        /// Position readings are anchored to the limit switch (always true
        /// for joints without one).
        calibrated: bool,
    },
    /// Driver failed its health check.
    Faulted(DriverFault),
}

impl JointState {
    /// Get the state name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            JointState::Uninitialized => "Uninitialized",
            JointState::Claimed => "Claimed",
            JointState::Ready { calibrated: true } => "Ready(calibrated)",
            JointState::Ready { calibrated: false } => "Ready(uncalibrated)",
            JointState::Faulted(_) => "Faulted",
        }
    }

    /// Whether the joint accepts motion commands.
    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, JointState::Ready { .. })
    }

    /// The fault, if the joint is faulted.
    #[inline]
    pub fn fault(&self) -> Option<DriverFault> {
        match self {
            JointState::Faulted(fault) => Some(*fault),
            _ => None,
        }
    }
}

/// Why the commanded target was last pinned to the actual position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopReason {
    /// Caller invoked `stop`.
    Commanded,
    /// Homing reached the limit switch.
    Homed,
    /// Homing gave up before reaching the switch.
    HomingTimeout,
    /// The tick interlock found the joint driving into a pressed blocking switch.
    LimitSwitch,
}

/// Event reported by `update` when the interlock stops the joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyStop {
    /// Actual step count the joint was stopped at.
    pub actual_steps: i32,
    /// Target step count that was cancelled.
    pub cancelled_target: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names() {
        assert_eq!(JointState::default().name(), "Uninitialized");
        assert_eq!(JointState::Ready { calibrated: false }.name(), "Ready(uncalibrated)");
        assert_eq!(
            JointState::Faulted(DriverFault::HardwareDisabled).fault(),
            Some(DriverFault::HardwareDisabled)
        );
        assert!(!JointState::Claimed.is_ready());
    }
}
