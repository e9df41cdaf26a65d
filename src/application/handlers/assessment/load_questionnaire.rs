//! LoadQuestionnaireHandler - Query handler that fetches the question bank.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::assessment::QuestionBank;
use crate::domain::foundation::{DimensionId, ItemId};
use crate::ports::{QuestionSource, QuestionSourceError};

/// One question as presented to the user, in bank order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireItem {
    pub item_id: ItemId,
    pub dimension_id: DimensionId,
    pub text: String,
}

/// The fetched bank plus a flat, ordered question list.
#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    pub dimensions: QuestionBank,
    pub items: Vec<QuestionnaireItem>,
}

impl Questionnaire {
    pub fn from_bank(bank: QuestionBank) -> Self {
        let items = bank
            .items()
            .map(|(dimension, item)| QuestionnaireItem {
                item_id: item.id.clone(),
                dimension_id: dimension.id.clone(),
                text: item.text.clone(),
            })
            .collect();
        Self {
            dimensions: bank,
            items,
        }
    }
}

/// Handler for loading the questionnaire.
pub struct LoadQuestionnaireHandler {
    source: Arc<dyn QuestionSource>,
}

impl LoadQuestionnaireHandler {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    pub async fn handle(&self) -> Result<Questionnaire, QuestionSourceError> {
        let bank = self.source.fetch_dimensions().await?;
        tracing::info!(
            dimensions = bank.len(),
            items = bank.item_count(),
            "Questionnaire loaded"
        );
        Ok(Questionnaire::from_bank(bank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::question_source::InMemoryQuestionSource;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl QuestionSource for FailingSource {
        async fn fetch_dimensions(&self) -> Result<QuestionBank, QuestionSourceError> {
            Err(QuestionSourceError::UpstreamHttp {
                status: 503,
                body: "mantenimiento".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn flattens_items_in_bank_order() {
        let handler = LoadQuestionnaireHandler::new(Arc::new(InMemoryQuestionSource::sample().unwrap()));

        let questionnaire = handler.handle().await.unwrap();

        assert_eq!(questionnaire.items.len(), questionnaire.dimensions.item_count());
        assert_eq!(questionnaire.items[0].item_id.as_str(), "REG1");
        assert_eq!(questionnaire.items[0].dimension_id.as_str(), "regulacion-emocional");
    }

    #[tokio::test]
    async fn propagates_source_errors_unchanged() {
        let handler = LoadQuestionnaireHandler::new(Arc::new(FailingSource));

        let err = handler.handle().await.unwrap_err();

        assert_eq!(
            err,
            QuestionSourceError::UpstreamHttp {
                status: 503,
                body: "mantenimiento".to_string()
            }
        );
    }
}
