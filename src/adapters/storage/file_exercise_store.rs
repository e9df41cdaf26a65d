//! File-based Exercise Store Adapter
//!
//! Stores the notebook and exercise progress as YAML files on disk:
//!
//! ```text
//! <base>/notebook.yaml                         all entries, oldest first
//! <base>/progress/<path_id>/<exercise_id>.yaml one snapshot per exercise
//! ```
//!
//! Concurrent writers from different processes follow last-write-wins.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::exercise::{ExerciseProgress, NotebookEntry};
use crate::domain::foundation::{ExerciseId, PathId};
use crate::ports::{NotebookRepository, ProgressRepository, RepositoryError};

const NOTEBOOK_FILE: &str = "notebook.yaml";
const PROGRESS_DIR: &str = "progress";

/// File-based storage for notebook entries and exercise progress.
#[derive(Debug)]
pub struct FileExerciseStore {
    base_path: PathBuf,
    /// Serializes the notebook read-modify-write within this process.
    notebook_lock: Mutex<()>,
}

impl FileExerciseStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileExerciseStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            notebook_lock: Mutex::new(()),
        }
    }

    fn notebook_path(&self) -> PathBuf {
        self.base_path.join(NOTEBOOK_FILE)
    }

    fn progress_path(&self, path_id: &PathId, exercise_id: &ExerciseId) -> PathBuf {
        self.base_path
            .join(PROGRESS_DIR)
            .join(file_component(path_id.as_str()))
            .join(format!("{}.yaml", file_component(exercise_id.as_str())))
    }

    async fn ensure_dir(path: &Path) -> Result<(), RepositoryError> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))
    }

    /// Reads and decodes a YAML file, `None` when it does not exist.
    async fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, RepositoryError> {
        if !fs::try_exists(path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?
        {
            return Ok(None);
        }

        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))?;

        serde_yaml::from_str(&yaml)
            .map(Some)
            .map_err(|e| RepositoryError::DeserializationFailed(e.to_string()))
    }

    async fn write_yaml<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), RepositoryError> {
        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent).await?;
        }

        let yaml = serde_yaml::to_string(value)
            .map_err(|e| RepositoryError::SerializationFailed(e.to_string()))?;

        fs::write(path, yaml)
            .await
            .map_err(|e| RepositoryError::IoError(e.to_string()))
    }
}

/// Bytes kept verbatim in file names; everything else is `%XX`-escaped.
const FILE_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Maps an identifier onto a single path component. Distinct ids never
/// share a file name.
fn file_component(id: &str) -> String {
    utf8_percent_encode(id, FILE_NAME_SET).to_string()
}

#[async_trait]
impl NotebookRepository for FileExerciseStore {
    async fn append(&self, entry: &NotebookEntry) -> Result<(), RepositoryError> {
        let _guard = self.notebook_lock.lock().await;
        let path = self.notebook_path();

        let mut entries: Vec<NotebookEntry> = Self::read_yaml(&path).await?.unwrap_or_default();
        entries.push(entry.clone());
        Self::write_yaml(&path, &entries).await?;

        tracing::debug!(entry_id = %entry.id, total = entries.len(), "Notebook entry appended");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<NotebookEntry>, RepositoryError> {
        Ok(Self::read_yaml(&self.notebook_path()).await?.unwrap_or_default())
    }

    async fn list_for_path(&self, path_id: &PathId) -> Result<Vec<NotebookEntry>, RepositoryError> {
        let entries = self.list().await?;
        Ok(entries.into_iter().filter(|e| &e.path_id == path_id).collect())
    }
}

#[async_trait]
impl ProgressRepository for FileExerciseStore {
    async fn save(&self, progress: &ExerciseProgress) -> Result<(), RepositoryError> {
        let path = self.progress_path(&progress.path_id, &progress.exercise_id);
        Self::write_yaml(&path, progress).await
    }

    async fn load(
        &self,
        path_id: &PathId,
        exercise_id: &ExerciseId,
    ) -> Result<Option<ExerciseProgress>, RepositoryError> {
        Self::read_yaml(&self.progress_path(path_id, exercise_id)).await
    }

    async fn delete(&self, path_id: &PathId, exercise_id: &ExerciseId) -> Result<(), RepositoryError> {
        let path = self.progress_path(path_id, exercise_id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepositoryError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::exercise::{ExerciseStatus, FieldValue};
    use crate::domain::foundation::Timestamp;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn path_id(id: &str) -> PathId {
        PathId::new(id).unwrap()
    }

    fn exercise_id(id: &str) -> ExerciseId {
        ExerciseId::new(id).unwrap()
    }

    fn entry(path: &str, body: &str) -> NotebookEntry {
        NotebookEntry::new(
            path_id(path),
            exercise_id("registro-emociones"),
            "Registro de emociones",
            body,
        )
    }

    fn progress(step: usize) -> ExerciseProgress {
        let mut responses = BTreeMap::new();
        responses.insert("situacion".to_string(), FieldValue::text("Reunión"));
        responses.insert("intensidad".to_string(), FieldValue::Number(7));
        ExerciseProgress {
            path_id: path_id("path-regulacion-emocional"),
            exercise_id: exercise_id("registro-emociones"),
            step,
            responses,
            status: ExerciseStatus::InProgress,
            updated_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appended_entries_persist_in_order() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());

        store.append(&entry("path-autoestima", "primera")).await.unwrap();
        store.append(&entry("path-sueno", "segunda")).await.unwrap();

        let reopened = FileExerciseStore::new(dir.path());
        let bodies: Vec<String> = reopened
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.body)
            .collect();
        assert_eq!(bodies, vec!["primera", "segunda"]);
        assert!(dir.path().join(NOTEBOOK_FILE).exists());
    }

    #[tokio::test]
    async fn list_for_path_filters_entries() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());
        store.append(&entry("path-autoestima", "a")).await.unwrap();
        store.append(&entry("path-sueno", "b")).await.unwrap();

        let entries = store.list_for_path(&path_id("path-sueno")).await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, "b");
    }

    #[tokio::test]
    async fn progress_round_trips_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());

        store.save(&progress(0)).await.unwrap();
        store.save(&progress(1)).await.unwrap();

        let loaded = store
            .load(&path_id("path-regulacion-emocional"), &exercise_id("registro-emociones"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.step, 1);
        assert_eq!(loaded.responses["intensidad"], FieldValue::Number(7));
    }

    #[tokio::test]
    async fn load_missing_progress_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());

        let loaded = store
            .load(&path_id("path-sueno"), &exercise_id("diario-sueno"))
            .await
            .unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());
        let (path, exercise) = (path_id("path-regulacion-emocional"), exercise_id("registro-emociones"));

        store.save(&progress(0)).await.unwrap();
        store.delete(&path, &exercise).await.unwrap();
        store.delete(&path, &exercise).await.unwrap();

        assert!(store.load(&path, &exercise).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_notebook_reports_deserialization_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(NOTEBOOK_FILE), "{ not: [valid").unwrap();
        let store = FileExerciseStore::new(dir.path());

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DeserializationFailed(_)));
    }

    #[test]
    fn file_component_neutralises_separators() {
        assert_eq!(file_component("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_eq!(file_component("path-sueno"), "path-sueno");
    }

    #[test]
    fn file_component_keeps_distinct_ids_apart() {
        assert_ne!(file_component("a.b"), file_component("a_b"));
        assert_ne!(file_component("a%2Eb"), file_component("a.b"));
    }

    #[tokio::test]
    async fn ids_differing_only_in_punctuation_keep_separate_progress() {
        let dir = TempDir::new().unwrap();
        let store = FileExerciseStore::new(dir.path());
        let mut dotted = progress(1);
        dotted.exercise_id = exercise_id("diario.sueno");
        let mut underscored = progress(2);
        underscored.exercise_id = exercise_id("diario_sueno");

        store.save(&dotted).await.unwrap();
        store.save(&underscored).await.unwrap();

        let loaded = store
            .load(&dotted.path_id, &dotted.exercise_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.step, 1);
        let loaded = store
            .load(&underscored.path_id, &underscored.exercise_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.step, 2);
    }
}
