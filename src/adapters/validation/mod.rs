//! Validation Adapters - Schema validation implementations.
//!
//! Contains adapters for validating generative model output against JSON Schemas.

mod json_schema_validator;

pub use json_schema_validator::{
    JsonSchemaValidator, FEEDBACK_FIELD, PRIORITY_FIELD, PROFILE_FIELD,
};
