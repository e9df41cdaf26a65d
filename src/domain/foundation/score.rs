//! Profile score value object (1.0 to 5.0 scale, one decimal).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A dimension score on the 1.0 to 5.0 wellness scale.
///
/// Always stored rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    /// Lowest possible score.
    pub const MIN: f64 = 1.0;

    /// Highest possible score.
    pub const MAX: f64 = 5.0;

    /// Creates a score, clamping to the valid range after rounding.
    pub fn clamped(value: f64) -> Self {
        Self(round_one_decimal(value).clamp(Self::MIN, Self::MAX))
    }

    /// Creates a score, returning error if outside [1.0, 5.0] or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format("score", "must be a finite number"));
        }
        if !Self::in_range(value) {
            return Err(ValidationError::out_of_range(
                "score",
                Self::MIN as i32,
                Self::MAX as i32,
                value.round() as i32,
            ));
        }
        Ok(Self(round_one_decimal(value)))
    }

    /// Returns true if the raw value lies within the score range.
    pub fn in_range(value: f64) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }

    /// Returns the value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Rounds half away from zero to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl TryFrom<f64> for Score {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}
