//! Exercise runtime: definitions, the wizard session and its outputs.

mod definition;
mod notebook;
mod progress;
mod session;

pub use definition::{ExerciseDefinition, FieldDefinition, FieldKind, StepDefinition};
pub use notebook::NotebookEntry;
pub use progress::{ExerciseProgress, ExerciseStatus, FieldValue};
pub use session::{ExerciseError, ExerciseSession};
