//! Interpretation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::interpreter::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
use crate::ports::CompletenessMode;

/// Which interpreter turns scores into feedback.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterpretationMode {
    /// Generative model through the configured AI provider.
    #[default]
    Llm,
    /// Deterministic lowest-three ranking.
    Ranking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterpretationConfig {
    #[serde(default)]
    pub mode: InterpretationMode,

    /// Strict fails on profiles that omit dimensions; lenient only warns
    #[serde(default)]
    pub completeness: CompletenessMode,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl InterpretationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for InterpretationConfig {
    fn default() -> Self {
        Self {
            mode: InterpretationMode::default(),
            completeness: CompletenessMode::default(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_llm() {
        let config = InterpretationConfig::default();
        assert_eq!(config.mode, InterpretationMode::Llm);
        assert_eq!(config.completeness, CompletenessMode::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let config = InterpretationConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }
}
