//! Progress Repository Port - resumable state of unfinished exercises.

use async_trait::async_trait;

use super::notebook_repository::RepositoryError;
use crate::domain::exercise::ExerciseProgress;
use crate::domain::foundation::{ExerciseId, PathId};

/// One snapshot per (path, exercise); saving again replaces it.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    async fn save(&self, progress: &ExerciseProgress) -> Result<(), RepositoryError>;

    async fn load(
        &self,
        path_id: &PathId,
        exercise_id: &ExerciseId,
    ) -> Result<Option<ExerciseProgress>, RepositoryError>;

    /// Removes the snapshot. Deleting a missing snapshot is not an error.
    async fn delete(&self, path_id: &PathId, exercise_id: &ExerciseId) -> Result<(), RepositoryError>;
}
