//! Likert answer value object (1 to 5 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A single Likert response: 1 (Nada) to 5 (Mucho).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct LikertAnswer(u8);

impl LikertAnswer {
    /// Lowest response on the scale.
    pub const MIN: u8 = 1;

    /// Highest response on the scale.
    pub const MAX: u8 = 5;

    /// Creates an answer, returning error if outside [1, 5].
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ValidationError::out_of_range(
                "answer",
                i32::from(Self::MIN),
                i32::from(Self::MAX),
                value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            ));
        }
        Ok(Self(value as u8))
    }

    /// Returns the raw response.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Reflects the response around the scale midpoint (`6 - raw`).
    pub fn reflected(&self) -> u8 {
        Self::MIN + Self::MAX - self.0
    }

    /// Returns the display label used in the questionnaire.
    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Nada",
            2 => "Poco",
            3 => "Moderadamente",
            4 => "Bastante",
            _ => "Mucho",
        }
    }
}

impl TryFrom<i64> for LikertAnswer {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LikertAnswer> for u8 {
    fn from(answer: LikertAnswer) -> Self {
        answer.0
    }
}

impl fmt::Display for LikertAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
