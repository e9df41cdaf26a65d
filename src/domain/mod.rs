//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `assessment` - Question bank, answers, deterministic scoring, interpretation values
//! - `catalog` - Paths, content blocks and path recommendation
//! - `exercise` - Exercise definitions and the wizard runtime

pub mod assessment;
pub mod catalog;
pub mod exercise;
pub mod foundation;
