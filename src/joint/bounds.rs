//! Soft-limit validation of commanded targets.

use crate::config::SoftLimits;
use crate::error::{JointError, JointResult};

/// Numeric check of a target position against the joint's soft limits.
///
/// Does not consult the limit switch; live sensor safety is the interlock's
/// job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionBounds {
    limits: SoftLimits,
}

impl MotionBounds {
    /// Create bounds from soft limits.
    #[inline]
    pub const fn new(limits: SoftLimits) -> Self {
        Self { limits }
    }

    /// The configured limits.
    #[inline]
    pub fn limits(&self) -> SoftLimits {
        self.limits
    }

    /// Accept `target` if it lies within `[min, max]`.
    ///
    /// Non-finite targets are rejected along with out-of-range values.
    pub fn validate(&self, target: f64) -> JointResult<f64> {
        if target.is_finite() && self.limits.contains(target) {
            Ok(target)
        } else {
            Err(JointError::OutOfBounds {
                position: target,
                min: self.limits.min,
                max: self.limits.max,
            })
        }
    }
}

impl From<SoftLimits> for MotionBounds {
    fn from(limits: SoftLimits) -> Self {
        Self::new(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reject() {
        let bounds = MotionBounds::new(SoftLimits::new(-1.57, 1.57));

        assert_eq!(bounds.validate(1.0), Ok(1.0));
        assert_eq!(bounds.validate(1.57), Ok(1.57));
        assert_eq!(bounds.validate(-1.57), Ok(-1.57));
        assert_eq!(
            bounds.validate(2.0),
            Err(JointError::OutOfBounds {
                position: 2.0,
                min: -1.57,
                max: 1.57
            })
        );
        assert!(bounds.validate(-1.6).is_err());
        assert!(bounds.validate(f64::NAN).is_err());
    }

    #[test]
    fn test_unbounded_accepts_everything_finite() {
        let bounds = MotionBounds::from(SoftLimits::unbounded());
        assert!(bounds.validate(1.0e300).is_ok());
        assert!(bounds.validate(f64::INFINITY).is_err());
    }
}
