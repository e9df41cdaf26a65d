//! Question Source Adapters.
//!
//! - `HttpQuestionSource` - Upstream HTTP service with a time-based token
//! - `InMemoryQuestionSource` - Fixed bank (bundled sample or supplied)

mod http_question_source;
mod in_memory;

pub use http_question_source::{access_token, HttpQuestionSource, HttpQuestionSourceConfig};
pub use in_memory::InMemoryQuestionSource;
