//! Assessment domain: question bank, answers, scoring and interpretation values.
//!
//! - `dimension` - Dimensions, items and the validated `QuestionBank`
//! - `answers` - The Likert `AnswerSheet`
//! - `scoring` - The deterministic `ScoringEngine`
//! - `profile` - `EmotionalProfile`, `PriorityAreas`, `Feedback`, `Interpretation`

mod answers;
mod dimension;
mod profile;
mod scoring;

pub use answers::AnswerSheet;
pub use dimension::{Dimension, DimensionKind, Item, QuestionBank};
pub use profile::{EmotionalProfile, Feedback, Interpretation, PriorityAreas};
pub use scoring::{
    default_state_dimensions, state_score, trait_contribution, DimensionScore, ScoredProfile,
    ScoringEngine, ScoringError, ScoringRules, UnansweredPolicy,
};
