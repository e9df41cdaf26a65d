//! SaveExerciseProgressHandler - Persists a resumable snapshot of a session.

use std::sync::Arc;

use super::error::ExerciseHandlerError;
use crate::domain::exercise::{ExerciseError, ExerciseProgress, ExerciseSession};
use crate::domain::foundation::StateMachine;
use crate::ports::ProgressRepository;

pub struct SaveExerciseProgressHandler {
    progress: Arc<dyn ProgressRepository>,
}

impl SaveExerciseProgressHandler {
    pub fn new(progress: Arc<dyn ProgressRepository>) -> Self {
        Self { progress }
    }

    /// Saves the session's current state, replacing any earlier snapshot.
    pub async fn handle(
        &self,
        session: &ExerciseSession,
    ) -> Result<ExerciseProgress, ExerciseHandlerError> {
        if session.status().is_terminal() {
            return Err(ExerciseError::AlreadySaved.into());
        }

        let snapshot = session.snapshot();
        self.progress.save(&snapshot).await?;
        tracing::debug!(
            path_id = %snapshot.path_id,
            exercise_id = %snapshot.exercise_id,
            step = snapshot.step,
            "Exercise progress saved"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryExerciseStore;
    use crate::domain::catalog::Catalog;
    use crate::domain::exercise::FieldValue;
    use crate::domain::foundation::{ExerciseId, PathId};

    fn session() -> ExerciseSession {
        let catalog = Catalog::builtin().unwrap();
        let definition = catalog
            .exercise(&ExerciseId::new("respiracion-consciente").unwrap())
            .unwrap()
            .clone();
        ExerciseSession::start(PathId::new("path-atencion-plena").unwrap(), definition).unwrap()
    }

    #[tokio::test]
    async fn saves_snapshot_of_current_step() {
        let store = Arc::new(InMemoryExerciseStore::new());
        let handler = SaveExerciseProgressHandler::new(store.clone());
        let mut session = session();
        session.record("tension-antes", FieldValue::Number(8)).unwrap();

        let saved = handler.handle(&session).await.unwrap();

        assert_eq!(saved.step, 0);
        let loaded = store
            .load(&saved.path_id, &saved.exercise_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.responses["tension-antes"], FieldValue::Number(8));
    }

    #[tokio::test]
    async fn refuses_finished_sessions() {
        let handler = SaveExerciseProgressHandler::new(Arc::new(InMemoryExerciseStore::new()));
        let mut session = session();
        session.record("tension-antes", FieldValue::Number(8)).unwrap();
        session.next().unwrap();
        session.record("tension-despues", FieldValue::Number(3)).unwrap();
        session.finish().unwrap();

        let err = handler.handle(&session).await.unwrap_err();

        assert!(matches!(
            err,
            ExerciseHandlerError::Exercise(ExerciseError::AlreadySaved)
        ));
    }
}
