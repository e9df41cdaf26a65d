//! StartExerciseHandler - Opens an exercise, resuming saved progress if any.

use std::sync::Arc;

use super::error::ExerciseHandlerError;
use crate::domain::catalog::Catalog;
use crate::domain::exercise::ExerciseSession;
use crate::domain::foundation::{ExerciseId, PathId};
use crate::ports::ProgressRepository;

/// Command to open an exercise within a path.
#[derive(Debug, Clone)]
pub struct StartExerciseCommand {
    pub path_id: PathId,
    pub exercise_id: ExerciseId,
}

/// Handler for starting or resuming exercises.
pub struct StartExerciseHandler {
    catalog: Arc<Catalog>,
    progress: Arc<dyn ProgressRepository>,
}

impl StartExerciseHandler {
    pub fn new(catalog: Arc<Catalog>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { catalog, progress }
    }

    pub async fn handle(
        &self,
        cmd: StartExerciseCommand,
    ) -> Result<ExerciseSession, ExerciseHandlerError> {
        // 1. Resolve path and exercise
        let path = self
            .catalog
            .path(&cmd.path_id)
            .ok_or_else(|| ExerciseHandlerError::UnknownPath(cmd.path_id.clone()))?;
        if !path.exercise_ids().any(|id| id == &cmd.exercise_id) {
            return Err(ExerciseHandlerError::ExerciseNotInPath {
                path: cmd.path_id,
                exercise: cmd.exercise_id,
            });
        }
        let definition = self
            .catalog
            .exercise(&cmd.exercise_id)
            .ok_or_else(|| ExerciseHandlerError::UnknownExercise(cmd.exercise_id.clone()))?
            .clone();

        // 2. Resume or start fresh
        let session = match self.progress.load(&cmd.path_id, &cmd.exercise_id).await? {
            Some(progress) => {
                tracing::debug!(
                    path_id = %cmd.path_id,
                    exercise_id = %cmd.exercise_id,
                    step = progress.step,
                    "Resuming exercise"
                );
                ExerciseSession::restore(definition, progress)?
            }
            None => ExerciseSession::start(cmd.path_id, definition)?,
        };

        Ok(session)
    }
}
