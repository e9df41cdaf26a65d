//! Question source configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where the question bank comes from.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSourceKind {
    /// The upstream HTTP service.
    #[default]
    Http,
    /// The bundled sample bank (offline runs).
    Sample,
}

/// Question source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSourceConfig {
    #[serde(default)]
    pub kind: QuestionSourceKind,

    /// Upstream base URL, e.g. `https://preguntas.example.com`
    pub base_url: Option<String>,

    /// Path appended to `base_url`
    #[serde(default = "default_resource_path")]
    pub resource_path: String,

    /// Shared secret for the access token
    pub secret: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl QuestionSourceConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate question source configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind == QuestionSourceKind::Sample {
            return Ok(());
        }

        let url = self
            .base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::MissingRequired("QUESTION_SOURCE__BASE_URL"))?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("question_source.base_url"));
        }
        if self.secret.is_none() {
            return Err(ValidationError::MissingRequired("QUESTION_SOURCE__SECRET"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("question_source"));
        }
        Ok(())
    }
}

impl Default for QuestionSourceConfig {
    fn default() -> Self {
        Self {
            kind: QuestionSourceKind::default(),
            base_url: None,
            resource_path: default_resource_path(),
            secret: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_resource_path() -> String {
    "/dimensions".to_string()
}

fn default_timeout() -> u64 {
    30
}
