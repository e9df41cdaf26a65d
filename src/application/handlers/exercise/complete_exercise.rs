//! CompleteExerciseHandler - Finishes a session and files its notebook entry.
//!
//! The returned entry is the completion signal for the caller.

use std::sync::Arc;

use super::error::ExerciseHandlerError;
use crate::domain::exercise::{ExerciseSession, NotebookEntry};
use crate::ports::{NotebookRepository, ProgressRepository};

pub struct CompleteExerciseHandler {
    notebook: Arc<dyn NotebookRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl CompleteExerciseHandler {
    pub fn new(notebook: Arc<dyn NotebookRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { notebook, progress }
    }

    pub async fn handle(
        &self,
        session: &mut ExerciseSession,
    ) -> Result<NotebookEntry, ExerciseHandlerError> {
        // 1. Finish (validates last step and required fields)
        let entry = session.finish()?;

        // 2. Append to the notebook
        self.notebook.append(&entry).await?;

        // 3. Drop the resumable snapshot
        self.progress
            .delete(&entry.path_id, &entry.exercise_id)
            .await?;

        tracing::info!(
            entry_id = %entry.id,
            path_id = %entry.path_id,
            exercise_id = %entry.exercise_id,
            "Exercise completed"
        );
        Ok(entry)
    }
}
