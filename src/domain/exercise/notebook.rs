//! Notebook entries: the formatted, append-only output of finished exercises.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExerciseId, NotebookEntryId, PathId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotebookEntry {
    pub id: NotebookEntryId,
    pub path_id: PathId,
    pub exercise_id: ExerciseId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
}

impl NotebookEntry {
    pub fn new(
        path_id: PathId,
        exercise_id: ExerciseId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: NotebookEntryId::new(),
            path_id,
            exercise_id,
            title: title.into(),
            body: body.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Heading shown in the notebook list: title plus local creation time.
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.created_at.local_display())
    }
}
