//! In-memory question source for tests and offline runs.

use async_trait::async_trait;

use crate::domain::assessment::{Dimension, QuestionBank};
use crate::ports::{QuestionSource, QuestionSourceError};

const SAMPLE_BANK: &str = include_str!("sample_bank.json");

/// Serves a fixed question bank.
#[derive(Debug, Clone)]
pub struct InMemoryQuestionSource {
    bank: QuestionBank,
}

impl InMemoryQuestionSource {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    /// The bundled 13-dimension sample bank.
    pub fn sample() -> Result<Self, QuestionSourceError> {
        let dimensions: Vec<Dimension> = serde_json::from_str(SAMPLE_BANK)
            .map_err(|e| QuestionSourceError::InvalidUpstreamFormat(e.to_string()))?;
        let bank = QuestionBank::new(dimensions)
            .map_err(|e| QuestionSourceError::InvalidUpstreamFormat(e.to_string()))?;
        Ok(Self::new(bank))
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn fetch_dimensions(&self) -> Result<QuestionBank, QuestionSourceError> {
        Ok(self.bank.clone())
    }
}
