//! Schema Validator Port - validation of generative model output.
//!
//! The interpreter depends on this trait, while adapters (like
//! `JsonSchemaValidator`) provide the implementation.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Shapes of model output that are validated on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseSchema {
    /// The top-level reply: `emotionalProfileJSON`, `priorityAreas`, `feedback`.
    Interpretation,
    /// The decoded `emotionalProfileJSON`: dimension name → number in [1, 5].
    EmotionalProfile,
}

impl ResponseSchema {
    pub fn all() -> &'static [ResponseSchema] {
        &[ResponseSchema::Interpretation, ResponseSchema::EmotionalProfile]
    }
}

impl fmt::Display for ResponseSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSchema::Interpretation => f.write_str("interpretation"),
            ResponseSchema::EmotionalProfile => f.write_str("emotional_profile"),
        }
    }
}

/// Port for validating model output against its schema.
///
/// # Contract
///
/// For `Interpretation`, checks run in a fixed order and the first failure is
/// returned: `emotionalProfileJSON`, then `priorityAreas`, then `feedback`.
/// For `EmotionalProfile`, every offending entry is reported.
pub trait ResponseSchemaValidator: Send + Sync {
    fn validate(&self, schema: ResponseSchema, value: &Value) -> Result<(), SchemaValidationError>;

    /// Raw JSON Schema document, for prompts and introspection.
    fn schema_for(&self, schema: ResponseSchema) -> &Value;
}

/// Errors that can occur during schema validation.
#[derive(Debug, Clone, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Field {field} must not be empty")]
    Empty { field: String },

    #[error("Field {field} must have exactly {expected} items, got {actual}")]
    WrongLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Name of the first offending field.
    pub fn field(&self) -> &str {
        match self {
            SchemaValidationError::MissingRequired { field }
            | SchemaValidationError::InvalidType { field, .. }
            | SchemaValidationError::Empty { field }
            | SchemaValidationError::WrongLength { field, .. }
            | SchemaValidationError::OutOfRange { field, .. } => field,
            SchemaValidationError::Multiple(errors) => {
                errors.first().map(|e| e.field()).unwrap_or("")
            }
        }
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }
}

impl PartialEq for SchemaValidationError {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
