//! HTTP Question Source - fetches the question bank from the upstream service.
//!
//! Each request carries a `token` query parameter:
//! `base64(secret + "|" + local time formatted "YYYY-MM-DD HH:mm:ss")`,
//! computed fresh on every call. Responses are never cached.
//!
//! ```ignore
//! let source = HttpQuestionSource::new(
//!     HttpQuestionSourceConfig::new("https://preguntas.example.com", "s3cr3t")
//!         .with_resource_path("/api/dimensions"),
//! )?;
//! let bank = source.fetch_dimensions().await?;
//! ```

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;

use crate::domain::assessment::{Dimension, QuestionBank};
use crate::ports::{QuestionSource, QuestionSourceError};

/// Timestamp layout embedded in the token.
const TOKEN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for the HTTP question source.
#[derive(Debug, Clone)]
pub struct HttpQuestionSourceConfig {
    pub base_url: String,
    /// Appended to `base_url` verbatim.
    pub resource_path: String,
    secret: Secret<String>,
    pub timeout: Duration,
}

impl HttpQuestionSourceConfig {
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            resource_path: "/dimensions".to_string(),
            secret: Secret::new(secret.into()),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.resource_path)
    }
}

/// Builds the time-based access token for a given instant.
pub fn access_token(secret: &str, at: DateTime<Local>) -> String {
    STANDARD.encode(format!("{}|{}", secret, at.format(TOKEN_TIME_FORMAT)))
}

/// Question source backed by the upstream HTTP service.
pub struct HttpQuestionSource {
    config: HttpQuestionSourceConfig,
    client: Client,
}

impl HttpQuestionSource {
    pub fn new(config: HttpQuestionSourceConfig) -> Result<Self, QuestionSourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuestionSourceError::Network(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Interprets a successful body as a question bank.
    fn parse_bank(body: &str) -> Result<QuestionBank, QuestionSourceError> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            QuestionSourceError::InvalidUpstreamFormat(format!("body is not JSON: {}", e))
        })?;
        if !value.is_array() {
            return Err(QuestionSourceError::InvalidUpstreamFormat(
                "expected a top-level JSON array of dimensions".to_string(),
            ));
        }

        let dimensions: Vec<Dimension> = serde_json::from_value(value).map_err(|e| {
            QuestionSourceError::InvalidUpstreamFormat(format!("unexpected dimension shape: {}", e))
        })?;

        QuestionBank::new(dimensions)
            .map_err(|e| QuestionSourceError::InvalidUpstreamFormat(e.to_string()))
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_dimensions(&self) -> Result<QuestionBank, QuestionSourceError> {
        let url = self.config.url();
        let token = access_token(self.config.secret.expose_secret(), Local::now());
        tracing::debug!(url = %url, "Fetching question bank");

        let response = self
            .client
            .get(&url)
            .query(&[("token", token.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, error = %e, "Question source unreachable");
                QuestionSourceError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            // The status is the error; a truncated body must not hide it.
            let body = response.text().await.unwrap_or_default();
            tracing::error!(url = %url, status = status.as_u16(), "Question source returned an error status");
            return Err(QuestionSourceError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QuestionSourceError::Network(format!("reading body: {}", e)))?;

        let bank = Self::parse_bank(&body).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Question source payload rejected");
            e
        })?;
        tracing::debug!(
            dimensions = bank.len(),
            items = bank.item_count(),
            "Question bank fetched"
        );
        Ok(bank)
    }
}
