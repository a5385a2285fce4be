//! Duty-cycle domain type
//!
//! Provides the validated duty percentage used for fan and pump writes.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Duty cycle percentage (0-100)
///
/// Validated on construction to ensure the value is within valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DutyCycle(u8);

impl DutyCycle {
    /// Minimum valid duty cycle
    pub const MIN: u8 = 0;
    /// Maximum valid duty cycle
    pub const MAX: u8 = 100;

    /// Create a new DutyCycle with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidDuty` if value > 100
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > Self::MAX {
            return Err(DomainError::InvalidDuty(value));
        }
        Ok(Self(value))
    }

    /// Get the duty as a percentage value (0-100)
    #[inline]
    pub const fn as_percentage(&self) -> u8 {
        self.0
    }

    /// Get the duty as a fraction (0.0-1.0)
    #[inline]
    pub fn as_fraction(&self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for DutyCycle {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DutyCycle> for u8 {
    fn from(duty: DutyCycle) -> Self {
        duty.0
    }
}

impl From<DutyCycle> for u32 {
    fn from(duty: DutyCycle) -> Self {
        duty.0 as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_valid() {
        assert!(DutyCycle::new(0).is_ok());
        assert!(DutyCycle::new(50).is_ok());
        assert!(DutyCycle::new(100).is_ok());
    }

    #[test]
    fn test_duty_invalid() {
        assert!(matches!(
            DutyCycle::new(101),
            Err(DomainError::InvalidDuty(101))
        ));
        assert!(DutyCycle::new(255).is_err());
    }

    #[test]
    fn test_duty_display() {
        let duty = DutyCycle::new(75).unwrap();
        assert_eq!(duty.to_string(), "75%");
    }

    #[test]
    fn test_duty_as_fraction() {
        let duty = DutyCycle::new(50).unwrap();
        assert!((duty.as_fraction() - 0.5).abs() < f32::EPSILON);
    }
}
