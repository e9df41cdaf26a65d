//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SENDA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use senda::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Notebook stored under {}", config.storage.data_dir.display());
//! ```

mod ai;
mod error;
mod interpretation;
mod question_source;
mod scoring;
mod storage;
mod telemetry;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use interpretation::{InterpretationConfig, InterpretationMode};
pub use question_source::{QuestionSourceConfig, QuestionSourceKind};
pub use scoring::ScoringConfig;
pub use storage::StorageConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; load with [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Question bank upstream (URL, secret, timeout)
    #[serde(default)]
    pub question_source: QuestionSourceConfig,

    /// AI provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Interpreter selection and model parameters
    #[serde(default)]
    pub interpretation: InterpretationConfig,

    /// Scoring rules
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Notebook and progress files
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SENDA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SENDA__QUESTION_SOURCE__BASE_URL=https://...` -> `question_source.base_url`
    /// - `SENDA__SCORING__STATE_DIMENSIONS=estado-animo,ansiedad-estado` -> list
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SENDA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scoring.state_dimensions"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The AI section is only checked when the LLM interpreter is selected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.question_source.validate()?;
        self.interpretation.validate()?;
        if self.interpretation.mode == InterpretationMode::Llm {
            self.ai.validate()?;
        }
        self.scoring.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
