//! Exercise command handlers.

mod complete_exercise;
mod error;
mod save_exercise_progress;
mod start_exercise;

pub use complete_exercise::CompleteExerciseHandler;
pub use error::ExerciseHandlerError;
pub use save_exercise_progress::SaveExerciseProgressHandler;
pub use start_exercise::{StartExerciseCommand, StartExerciseHandler};
