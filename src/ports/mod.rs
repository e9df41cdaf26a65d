//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Assessment Ports
//!
//! - `QuestionSource` - Fetches the question bank
//! - `AIProvider` - Generative model completions
//! - `ProfileInterpreter` - Feedback and priority areas for a scored profile
//! - `ResponseSchemaValidator` - Validates model output on receipt
//!
//! ## Exercise Ports
//!
//! - `NotebookRepository` - Append-only notebook of finished exercises
//! - `ProgressRepository` - Resumable exercise snapshots

mod ai_provider;
mod notebook_repository;
mod profile_interpreter;
mod progress_repository;
mod question_source;
mod schema_validator;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use notebook_repository::{NotebookRepository, RepositoryError};
pub use profile_interpreter::{
    AnsweredItem, CompletenessMode, InterpretationError, InterpretationRequest,
    ProfileInterpreter,
};
pub use progress_repository::ProgressRepository;
pub use question_source::{QuestionSource, QuestionSourceError};
pub use schema_validator::{ResponseSchema, ResponseSchemaValidator, SchemaValidationError};
