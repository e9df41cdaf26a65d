//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;
pub mod exercise;

pub use assessment::{
    AssessmentError, AssessmentOutcome, CompleteAssessmentCommand, CompleteAssessmentHandler,
    LoadQuestionnaireHandler, Questionnaire,
};
pub use exercise::{
    CompleteExerciseHandler, ExerciseHandlerError, SaveExerciseProgressHandler,
    StartExerciseCommand, StartExerciseHandler,
};
