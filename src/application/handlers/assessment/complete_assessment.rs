//! CompleteAssessmentHandler - Command handler that scores, interprets and
//! recommends paths for one answer sheet.
//!
//! The deterministic scores are authoritative. The interpreter's own profile
//! is compared against them: disagreements are logged, and dimensions the
//! engine could not score are taken from the interpreter. Whatever is still
//! missing afterwards is subject to the handler's completeness mode.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::assessment::{
    AnswerSheet, DimensionScore, EmotionalProfile, Feedback, PriorityAreas, QuestionBank,
    ScoredProfile, ScoringEngine, ScoringError,
};
use crate::domain::catalog::{Catalog, PathRecommender, PathSuggestion};
use crate::domain::foundation::AssessmentId;
use crate::ports::{
    CompletenessMode, InterpretationError, InterpretationRequest, ProfileInterpreter,
    QuestionSourceError,
};

/// Interpreter scores further than this from the engine's are logged.
pub const RECONCILE_TOLERANCE: f64 = 0.1;

/// Command to complete an assessment.
#[derive(Debug, Clone)]
pub struct CompleteAssessmentCommand {
    pub bank: QuestionBank,
    pub answers: AnswerSheet,
}

/// Result of a completed assessment.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutcome {
    pub assessment_id: AssessmentId,
    pub profile: EmotionalProfile,
    /// Per-dimension detail behind `profile`.
    pub scores: Vec<DimensionScore>,
    pub priority_areas: PriorityAreas,
    pub feedback: Feedback,
    pub suggestions: Vec<PathSuggestion>,
}

/// Any failure along the assessment pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    QuestionSource(#[from] QuestionSourceError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Interpretation(#[from] InterpretationError),
}

/// Handler for completing assessments.
pub struct CompleteAssessmentHandler {
    engine: ScoringEngine,
    interpreter: Arc<dyn ProfileInterpreter>,
    catalog: Arc<Catalog>,
    completeness: CompletenessMode,
}

impl CompleteAssessmentHandler {
    pub fn new(
        engine: ScoringEngine,
        interpreter: Arc<dyn ProfileInterpreter>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            engine,
            interpreter,
            catalog,
            completeness: CompletenessMode::default(),
        }
    }

    /// Sets how a final profile that misses bank dimensions is treated.
    pub fn with_completeness(mut self, mode: CompletenessMode) -> Self {
        self.completeness = mode;
        self
    }

    pub async fn handle(
        &self,
        cmd: CompleteAssessmentCommand,
    ) -> Result<AssessmentOutcome, AssessmentError> {
        let assessment_id = AssessmentId::new();

        // 1. Score
        let scored = self.engine.score(&cmd.bank, &cmd.answers)?;
        tracing::info!(
            assessment_id = %assessment_id,
            answers = cmd.answers.len(),
            scored = scored.scores.len(),
            unscored = scored.unscored.len(),
            "Answers scored"
        );

        // 2. Interpret
        let request = InterpretationRequest::build(
            assessment_id,
            &cmd.bank,
            &cmd.answers,
            self.engine.rules(),
            scored.clone(),
        );
        let interpretation = self.interpreter.interpret(&request).await?;
        tracing::info!(
            assessment_id = %assessment_id,
            interpreter = self.interpreter.name(),
            priorities = ?interpretation.priority_areas.as_slice(),
            "Profile interpreted"
        );

        // 3. Reconcile
        let dimension_names = cmd.bank.dimension_names();
        let profile = reconcile(&scored, &interpretation.emotional_profile, &dimension_names);
        let missing = profile.missing_from(&dimension_names);
        if !missing.is_empty() {
            match self.completeness {
                CompletenessMode::Strict => {
                    return Err(InterpretationError::IncompleteProfile {
                        missing: missing.iter().map(|m| m.to_string()).collect(),
                    }
                    .into())
                }
                CompletenessMode::Lenient => {
                    tracing::warn!(
                        assessment_id = %assessment_id,
                        missing = ?missing,
                        "Final profile omits dimensions; continuing in lenient mode"
                    );
                }
            }
        }

        // 4. Recommend
        let suggestions = PathRecommender::from_bank(&cmd.bank).suggestions_for(
            &interpretation.priority_areas,
            &cmd.bank,
            &self.catalog,
        );

        Ok(AssessmentOutcome {
            assessment_id,
            profile,
            scores: scored.scores,
            priority_areas: interpretation.priority_areas,
            feedback: interpretation.feedback,
            suggestions,
        })
    }
}

/// Builds the final profile from the engine's scores, logging where the
/// interpreter disagrees. Bank dimensions the engine left unscored are
/// filled from the interpreter when it rated them.
pub fn reconcile(
    scored: &ScoredProfile,
    interpreted: &EmotionalProfile,
    dimension_names: &[String],
) -> EmotionalProfile {
    for score in &scored.scores {
        match interpreted.get(&score.name) {
            Some(theirs) if (theirs.value() - score.score.value()).abs() > RECONCILE_TOLERANCE => {
                tracing::warn!(
                    dimension = %score.name,
                    computed = score.score.value(),
                    interpreted = theirs.value(),
                    "Interpreter score disagrees with computed score"
                );
            }
            Some(_) => {}
            None => {
                tracing::debug!(dimension = %score.name, "Interpreter did not rate a scored dimension");
            }
        }
    }

    let mut profile = scored.to_emotional_profile();
    for name in dimension_names {
        if profile.contains(name) {
            continue;
        }
        if let Some(theirs) = interpreted.get(name) {
            tracing::debug!(dimension = %name, "Filling unscored dimension from interpretation");
            profile.insert(name.clone(), theirs);
        }
    }
    profile
}
