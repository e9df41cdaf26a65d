//! Exercise definitions: the declarative shape of a multi-step reflection form.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExerciseId, ValidationError};

/// Input widget for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text.
    Text {
        #[serde(default)]
        multiline: bool,
    },
    /// Integer slider, inclusive bounds.
    Slider { min: i32, max: i32 },
}

/// One input on a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
}

/// One screen of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl StepDefinition {
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// A complete exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: ExerciseId,
    pub title: String,
    pub steps: Vec<StepDefinition>,
}

impl ExerciseDefinition {
    /// Checks the definition is usable by the runtime.
    ///
    /// Requires at least one step, field keys unique within the exercise and
    /// slider bounds with `min < max`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.steps.is_empty() {
            return Err(ValidationError::empty_field(format!(
                "exercises[{}].steps",
                self.id
            )));
        }

        let mut seen = std::collections::HashSet::new();
        for step in &self.steps {
            for field in &step.fields {
                if !seen.insert(field.key.as_str()) {
                    return Err(ValidationError::invalid_format(
                        format!("exercises[{}].fields", self.id),
                        format!("duplicate field key '{}'", field.key),
                    ));
                }
                if let FieldKind::Slider { min, max } = field.kind {
                    if min >= max {
                        return Err(ValidationError::invalid_format(
                            format!("exercises[{}].{}", self.id, field.key),
                            format!("slider min {} must be below max {}", min, max),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Index of the last step.
    pub fn last_step(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Finds a field anywhere in the exercise.
    pub fn field(&self, key: &str) -> Option<&FieldDefinition> {
        self.steps.iter().find_map(|s| s.field(key))
    }
}
