//! In-Memory Exercise Store Adapter
//!
//! Keeps the notebook and exercise progress in memory. Useful for tests and
//! for runs that should leave nothing on disk.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::exercise::{ExerciseProgress, NotebookEntry};
use crate::domain::foundation::{ExerciseId, PathId};
use crate::ports::{NotebookRepository, ProgressRepository, RepositoryError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryExerciseStore {
    notebook: Arc<RwLock<Vec<NotebookEntry>>>,
    progress: Arc<RwLock<HashMap<(PathId, ExerciseId), ExerciseProgress>>>,
}

impl InMemoryExerciseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved progress snapshots.
    pub async fn progress_count(&self) -> usize {
        self.progress.read().await.len()
    }
}

#[async_trait]
impl NotebookRepository for InMemoryExerciseStore {
    async fn append(&self, entry: &NotebookEntry) -> Result<(), RepositoryError> {
        self.notebook.write().await.push(entry.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<NotebookEntry>, RepositoryError> {
        Ok(self.notebook.read().await.clone())
    }

    async fn list_for_path(&self, path_id: &PathId) -> Result<Vec<NotebookEntry>, RepositoryError> {
        Ok(self
            .notebook
            .read()
            .await
            .iter()
            .filter(|e| &e.path_id == path_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryExerciseStore {
    async fn save(&self, progress: &ExerciseProgress) -> Result<(), RepositoryError> {
        let key = (progress.path_id.clone(), progress.exercise_id.clone());
        self.progress.write().await.insert(key, progress.clone());
        Ok(())
    }

    async fn load(
        &self,
        path_id: &PathId,
        exercise_id: &ExerciseId,
    ) -> Result<Option<ExerciseProgress>, RepositoryError> {
        let key = (path_id.clone(), exercise_id.clone());
        Ok(self.progress.read().await.get(&key).cloned())
    }

    async fn delete(&self, path_id: &PathId, exercise_id: &ExerciseId) -> Result<(), RepositoryError> {
        let key = (path_id.clone(), exercise_id.clone());
        self.progress.write().await.remove(&key);
        Ok(())
    }
}
