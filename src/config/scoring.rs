//! Scoring configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assessment::{default_state_dimensions, ScoringRules, UnansweredPolicy};

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Dimension ids or names scored with the state rule (comma-separated in env)
    #[serde(default = "default_state_dimensions")]
    pub state_dimensions: Vec<String>,

    #[serde(default)]
    pub unanswered: UnansweredPolicy,
}

impl ScoringConfig {
    pub fn rules(&self) -> ScoringRules {
        ScoringRules {
            state_dimensions: self.state_dimensions.clone(),
            unanswered: self.unanswered,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.state_dimensions.iter().any(|d| d.trim().is_empty()) {
            return Err(ValidationError::BlankStateDimension);
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            state_dimensions: default_state_dimensions(),
            unanswered: UnansweredPolicy::default(),
        }
    }
}
