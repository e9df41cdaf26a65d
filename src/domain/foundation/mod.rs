//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the assessment and exercise domains.

mod errors;
mod ids;
mod likert;
mod score;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{AssessmentId, DimensionId, ExerciseId, ItemId, NotebookEntryId, PathId};
pub use likert::LikertAnswer;
pub use score::{round_one_decimal, Score};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
