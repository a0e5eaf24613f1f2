use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Prior belief in a pattern, clamped to [0.0, 1.0].
/// Decays while the pattern goes unused and never goes negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Weight(f64);

impl Weight {
    /// Weight assigned to freshly learned patterns.
    pub const INITIAL: f64 = 0.5;
    /// Weight below which a pattern contributes little to scoring.
    pub const NEGLIGIBLE: f64 = 0.1;

    /// Create a new Weight, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Apply one decay step. Monotonic non-increasing for factors <= 1.0.
    pub fn decayed(self, factor: f64) -> Self {
        Self::new(self.0 * factor.clamp(0.0, 1.0))
    }

    pub fn is_negligible(self) -> bool {
        self.0 < Self::NEGLIGIBLE
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(Self::INITIAL)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(w: Weight) -> Self {
        w.0
    }
}

impl Mul<f64> for Weight {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range() {
        assert_eq!(Weight::new(1.5).value(), 1.0);
        assert_eq!(Weight::new(-0.2).value(), 0.0);
    }

    #[test]
    fn decay_is_monotonic() {
        let mut w = Weight::new(0.8);
        for _ in 0..100 {
            let next = w.decayed(0.9);
            assert!(next.value() <= w.value());
            assert!(next.value() >= 0.0);
            w = next;
        }
    }
}
