//! Exercise storage adapters.
//!
//! Implementations of the `NotebookRepository` and `ProgressRepository` ports.
//!
//! - `FileExerciseStore` - YAML files on disk
//! - `InMemoryExerciseStore` - In-memory storage for testing

mod file_exercise_store;
mod in_memory_exercise_store;

pub use file_exercise_store::FileExerciseStore;
pub use in_memory_exercise_store::InMemoryExerciseStore;
