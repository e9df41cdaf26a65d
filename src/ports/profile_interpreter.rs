//! Profile Interpreter Port - turns a scored profile into feedback and priorities.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ai_provider::AIError;
use crate::domain::assessment::{
    AnswerSheet, DimensionKind, Interpretation, QuestionBank, ScoredProfile, ScoringRules,
};
use crate::domain::foundation::{AssessmentId, ItemId, LikertAnswer};

/// How to treat an interpreted profile that omits supplied dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletenessMode {
    /// Fail with `IncompleteProfile`.
    #[default]
    Strict,
    /// Log a warning and continue.
    Lenient,
}

/// One answered item as shown to the interpreter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnsweredItem {
    pub item_id: ItemId,
    pub text: String,
    /// Display name of the owning dimension.
    pub dimension: String,
    pub kind: DimensionKind,
    pub weight: f64,
    pub is_inverse: bool,
    pub answer: LikertAnswer,
}

/// Everything an interpreter needs for one assessment.
#[derive(Debug, Clone)]
pub struct InterpretationRequest {
    pub assessment_id: AssessmentId,
    /// Answered items in question bank order.
    pub answered_items: Vec<AnsweredItem>,
    /// Every dimension name defined by the source, in bank order.
    pub dimension_names: Vec<String>,
    /// The deterministic scores.
    pub scored: ScoredProfile,
}

impl InterpretationRequest {
    pub fn build(
        assessment_id: AssessmentId,
        bank: &QuestionBank,
        answers: &AnswerSheet,
        rules: &ScoringRules,
        scored: ScoredProfile,
    ) -> Self {
        let answered_items = bank
            .items()
            .filter_map(|(dimension, item)| {
                let answer = answers.get(&item.id)?;
                Some(AnsweredItem {
                    item_id: item.id.clone(),
                    text: item.text.clone(),
                    dimension: dimension.name.clone(),
                    kind: rules.kind_of(dimension),
                    weight: item.weight,
                    is_inverse: item.is_inverse,
                    answer,
                })
            })
            .collect();

        Self {
            assessment_id,
            answered_items,
            dimension_names: bank.dimension_names(),
            scored,
        }
    }
}

/// Interpretation failures. Every variant is fatal for the assessment.
#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    /// The reply broke the output contract (missing reply, fields or counts).
    #[error("Interpretation contract violated ({rule}); raw reply: {raw}")]
    ContractViolation { rule: String, raw: String },

    /// `emotionalProfileJSON` is not a JSON map of dimension → score in [1, 5].
    #[error("Malformed emotional profile JSON ({reason}): {raw}")]
    MalformedProfileJson { reason: String, raw: String },

    /// Strict mode: the profile omits supplied dimensions.
    #[error("Emotional profile is missing dimensions: {}", missing.join(", "))]
    IncompleteProfile { missing: Vec<String> },

    /// Fewer scored dimensions than priority areas to choose.
    #[error("Need at least {needed} scored dimensions, have {available}")]
    InsufficientDimensions { needed: usize, available: usize },

    #[error("AI provider failed: {0}")]
    Provider(#[from] AIError),
}

impl InterpretationError {
    pub fn contract(rule: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::ContractViolation {
            rule: rule.into(),
            raw: raw.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::MalformedProfileJson {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}

/// Port for interpreting a scored profile.
#[async_trait]
pub trait ProfileInterpreter: Send + Sync {
    async fn interpret(
        &self,
        request: &InterpretationRequest,
    ) -> Result<Interpretation, InterpretationError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
