//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Assessment handlers
    AssessmentError, AssessmentOutcome, CompleteAssessmentCommand, CompleteAssessmentHandler,
    LoadQuestionnaireHandler, Questionnaire,
    // Exercise handlers
    CompleteExerciseHandler, ExerciseHandlerError, SaveExerciseProgressHandler,
    StartExerciseCommand, StartExerciseHandler,
};
