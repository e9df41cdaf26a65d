//! Profile Interpreter Adapters.
//!
//! - `LlmProfileInterpreter` - Generative model with validated JSON output
//! - `RankingInterpreter` - Deterministic lowest-three ranking

mod llm_interpreter;
mod prompt;
mod ranking_interpreter;

pub use llm_interpreter::{LlmProfileInterpreter, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};
pub use ranking_interpreter::RankingInterpreter;
