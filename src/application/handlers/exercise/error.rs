//! Errors shared by the exercise handlers.

use crate::domain::exercise::ExerciseError;
use crate::domain::foundation::{ExerciseId, PathId};
use crate::ports::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ExerciseHandlerError {
    #[error("Unknown path '{0}'")]
    UnknownPath(PathId),

    #[error("Unknown exercise '{0}'")]
    UnknownExercise(ExerciseId),

    #[error("Exercise '{exercise}' is not part of path '{path}'")]
    ExerciseNotInPath { path: PathId, exercise: ExerciseId },

    #[error(transparent)]
    Exercise(#[from] ExerciseError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
