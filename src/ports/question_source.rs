//! Question Source Port - where the assessment question bank comes from.

use async_trait::async_trait;

use crate::domain::assessment::QuestionBank;

/// Errors fetching the question bank.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuestionSourceError {
    /// The upstream answered with a non-2xx status.
    #[error("Question source returned HTTP {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// The body was not a JSON array of dimensions, or the bank is inconsistent.
    #[error("Question source returned an invalid payload: {0}")]
    InvalidUpstreamFormat(String),

    /// Connect, timeout or other transport failure.
    #[error("Question source unreachable: {0}")]
    Network(String),
}

/// Port for loading the dimensions and items of an assessment.
///
/// Every call fetches afresh; implementations do not cache.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_dimensions(&self) -> Result<QuestionBank, QuestionSourceError>;
}
