//! Notebook Repository Port - append-only store of finished exercise outputs.

use async_trait::async_trait;

use crate::domain::exercise::NotebookEntry;
use crate::domain::foundation::PathId;

/// Errors raised by the exercise repositories.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize record: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

#[async_trait]
pub trait NotebookRepository: Send + Sync {
    /// Appends an entry. Entries are never edited in place.
    async fn append(&self, entry: &NotebookEntry) -> Result<(), RepositoryError>;

    /// All entries, oldest first.
    async fn list(&self) -> Result<Vec<NotebookEntry>, RepositoryError>;

    /// Entries produced within one path, oldest first.
    async fn list_for_path(&self, path_id: &PathId) -> Result<Vec<NotebookEntry>, RepositoryError>;
}
