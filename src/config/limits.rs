//! Soft limit configuration.

/// Software-enforced bounds on commanded position, in joint units.
///
/// Both bounds default to infinity, i.e. an unbounded joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftLimits {
    /// Minimum allowed position.
    pub min: f64,

    /// Maximum allowed position.
    pub max: f64,
}

impl Default for SoftLimits {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl SoftLimits {
    /// Create new soft limits.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Limits that accept every finite position.
    pub const fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Check if limits are valid (min < max, neither NaN).
    pub fn is_valid(&self) -> bool {
        self.min < self.max
    }

    /// Check if a position is within limits (inclusive).
    pub fn contains(&self, position: f64) -> bool {
        position >= self.min && position <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive() {
        let limits = SoftLimits::new(-1.57, 1.57);

        assert!(limits.contains(0.0));
        assert!(limits.contains(1.57));
        assert!(limits.contains(-1.57));
        assert!(!limits.contains(1.58));
        assert!(!limits.contains(-1.58));
        assert!(!limits.contains(f64::NAN));
    }

    #[test]
    fn test_unbounded() {
        let limits = SoftLimits::default();

        assert!(limits.is_valid());
        assert!(limits.contains(1.0e12));
        assert!(limits.contains(-1.0e12));
    }

    #[test]
    fn test_invalid_limits() {
        assert!(!SoftLimits::new(1.0, -1.0).is_valid());
        assert!(!SoftLimits::new(1.0, 1.0).is_valid());
        assert!(!SoftLimits::new(f64::NAN, 1.0).is_valid());
    }
}
