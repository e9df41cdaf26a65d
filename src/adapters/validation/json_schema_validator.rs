//! JSON Schema Validator - Implementation of ResponseSchemaValidator.
//!
//! Uses manual validation that mirrors the embedded JSON Schema documents.
//! Checks on the interpretation reply stop at the first failure so callers
//! see violations in a fixed order.

use serde_json::{Map, Value};

use crate::domain::assessment::PriorityAreas;
use crate::domain::foundation::Score;
use crate::ports::{ResponseSchema, ResponseSchemaValidator, SchemaValidationError};

const INTERPRETATION_SCHEMA: &str = include_str!("schemas/interpretation.json");
const EMOTIONAL_PROFILE_SCHEMA: &str = include_str!("schemas/emotional_profile.json");

/// Field names of the interpretation reply.
pub const PROFILE_FIELD: &str = "emotionalProfileJSON";
pub const PRIORITY_FIELD: &str = "priorityAreas";
pub const FEEDBACK_FIELD: &str = "feedback";

/// JSON Schema-based validator implementation.
///
/// Schemas are embedded in the binary via `include_str!` and parsed once on
/// construction.
#[derive(Debug, Clone)]
pub struct JsonSchemaValidator {
    interpretation: Value,
    emotional_profile: Value,
}

impl JsonSchemaValidator {
    pub fn new() -> Result<Self, serde_json::Error> {
        Ok(Self {
            interpretation: serde_json::from_str(INTERPRETATION_SCHEMA)?,
            emotional_profile: serde_json::from_str(EMOTIONAL_PROFILE_SCHEMA)?,
        })
    }

    fn validate_interpretation(&self, output: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(output, "root")?;

        self.require_non_empty_string(obj, PROFILE_FIELD)?;

        let areas = obj
            .get(PRIORITY_FIELD)
            .ok_or_else(|| SchemaValidationError::MissingRequired {
                field: PRIORITY_FIELD.to_string(),
            })?;
        let areas = areas
            .as_array()
            .ok_or_else(|| SchemaValidationError::InvalidType {
                field: PRIORITY_FIELD.to_string(),
                expected: "array".to_string(),
                actual: Self::type_name(areas),
            })?;
        if areas.len() != PriorityAreas::COUNT {
            return Err(SchemaValidationError::WrongLength {
                field: PRIORITY_FIELD.to_string(),
                expected: PriorityAreas::COUNT,
                actual: areas.len(),
            });
        }
        for (i, area) in areas.iter().enumerate() {
            let field = format!("{}[{}]", PRIORITY_FIELD, i);
            match area.as_str() {
                Some(s) if !s.trim().is_empty() => {}
                Some(_) => return Err(SchemaValidationError::Empty { field }),
                None => {
                    return Err(SchemaValidationError::InvalidType {
                        field,
                        expected: "string".to_string(),
                        actual: Self::type_name(area),
                    })
                }
            }
        }

        self.require_non_empty_string(obj, FEEDBACK_FIELD)?;
        Ok(())
    }

    fn validate_emotional_profile(&self, output: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(output, "root")?;
        if obj.is_empty() {
            return Err(SchemaValidationError::Empty {
                field: "root".to_string(),
            });
        }

        let mut errors = Vec::new();
        for (name, value) in obj {
            match value.as_f64() {
                Some(score) if (Score::MIN..=Score::MAX).contains(&score) => {}
                Some(score) => errors.push(SchemaValidationError::OutOfRange {
                    field: name.clone(),
                    value: score.to_string(),
                    min: Score::MIN.to_string(),
                    max: Score::MAX.to_string(),
                }),
                None => errors.push(SchemaValidationError::InvalidType {
                    field: name.clone(),
                    expected: "number".to_string(),
                    actual: Self::type_name(value),
                }),
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::collect_errors(errors))
        }
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn require_object<'a>(
        &self,
        value: &'a Value,
        path: &str,
    ) -> Result<&'a Map<String, Value>, SchemaValidationError> {
        value.as_object().ok_or_else(|| SchemaValidationError::InvalidType {
            field: path.to_string(),
            expected: "object".to_string(),
            actual: Self::type_name(value),
        })
    }

    fn require_non_empty_string(
        &self,
        obj: &Map<String, Value>,
        field: &str,
    ) -> Result<(), SchemaValidationError> {
        let val = obj
            .get(field)
            .ok_or_else(|| SchemaValidationError::MissingRequired {
                field: field.to_string(),
            })?;
        let s = val.as_str().ok_or_else(|| SchemaValidationError::InvalidType {
            field: field.to_string(),
            expected: "string".to_string(),
            actual: Self::type_name(val),
        })?;
        if s.trim().is_empty() {
            return Err(SchemaValidationError::Empty {
                field: field.to_string(),
            });
        }
        Ok(())
    }

    fn type_name(value: &Value) -> String {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }

    fn collect_errors(mut errors: Vec<SchemaValidationError>) -> SchemaValidationError {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            SchemaValidationError::Multiple(errors)
        }
    }
}

impl ResponseSchemaValidator for JsonSchemaValidator {
    fn validate(&self, schema: ResponseSchema, value: &Value) -> Result<(), SchemaValidationError> {
        match schema {
            ResponseSchema::Interpretation => self.validate_interpretation(value),
            ResponseSchema::EmotionalProfile => self.validate_emotional_profile(value),
        }
    }

    fn schema_for(&self, schema: ResponseSchema) -> &Value {
        match schema {
            ResponseSchema::Interpretation => &self.interpretation,
            ResponseSchema::EmotionalProfile => &self.emotional_profile,
        }
    }
}
