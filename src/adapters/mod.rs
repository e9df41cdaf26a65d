//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `question_source` - Question bank over HTTP, or a fixed in-memory bank
//! - `ai` - Generative model providers (Anthropic, OpenAI, mock)
//! - `interpreter` - LLM-backed and deterministic profile interpreters
//! - `validation` - JSON Schema validation of model output
//! - `storage` - Notebook and exercise progress persistence

pub mod ai;
pub mod interpreter;
pub mod question_source;
pub mod storage;
pub mod validation;

pub use ai::{AnthropicConfig, AnthropicProvider, MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use interpreter::{LlmProfileInterpreter, RankingInterpreter};
pub use question_source::{HttpQuestionSource, HttpQuestionSourceConfig, InMemoryQuestionSource};
pub use storage::{FileExerciseStore, InMemoryExerciseStore};
pub use validation::JsonSchemaValidator;
