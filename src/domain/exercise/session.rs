//! The exercise wizard.
//!
//! A session walks the steps of an [`ExerciseDefinition`] one at a time. The
//! current step always lies in `[0, N-1]`; moving forward requires every
//! required field of the current step, and finishing is only possible from
//! the last step. A finished session is `Saved` and rejects further edits.

use std::collections::BTreeMap;
use thiserror::Error;

use super::definition::{ExerciseDefinition, FieldKind};
use super::notebook::NotebookEntry;
use super::progress::{ExerciseProgress, ExerciseStatus, FieldValue};
use crate::domain::foundation::{ExerciseId, PathId, StateMachine, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExerciseError {
    #[error("Step {step} has no field '{field}'")]
    UnknownField { step: usize, field: String },

    #[error("Field '{field}' expects {expected}")]
    WrongValueKind { field: String, expected: &'static str },

    #[error("Required fields missing on step {step}: {}", fields.join(", "))]
    RequiredFieldsMissing { step: usize, fields: Vec<String> },

    #[error("Exercise can only be finished from the last step (at {step} of {last})")]
    NotOnLastStep { step: usize, last: usize },

    #[error("Exercise has already been saved")]
    AlreadySaved,

    #[error("Progress belongs to exercise '{found}', expected '{expected}'")]
    ProgressMismatch {
        expected: ExerciseId,
        found: ExerciseId,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
pub struct ExerciseSession {
    path_id: PathId,
    definition: ExerciseDefinition,
    step: usize,
    responses: BTreeMap<String, FieldValue>,
    status: ExerciseStatus,
}

impl ExerciseSession {
    /// Starts a fresh session at step 0.
    pub fn start(path_id: PathId, definition: ExerciseDefinition) -> Result<Self, ExerciseError> {
        definition.validate()?;
        Ok(Self {
            path_id,
            definition,
            step: 0,
            responses: BTreeMap::new(),
            status: ExerciseStatus::InProgress,
        })
    }

    /// Resumes from a snapshot.
    ///
    /// The step is clamped to the definition's range and responses for
    /// fields the definition no longer has are dropped.
    pub fn restore(
        definition: ExerciseDefinition,
        progress: ExerciseProgress,
    ) -> Result<Self, ExerciseError> {
        if progress.exercise_id != definition.id {
            return Err(ExerciseError::ProgressMismatch {
                expected: definition.id.clone(),
                found: progress.exercise_id,
            });
        }
        definition.validate()?;

        let step = progress.step.min(definition.last_step());
        let responses = progress
            .responses
            .into_iter()
            .filter(|(key, _)| definition.field(key).is_some())
            .collect();

        Ok(Self {
            path_id: progress.path_id,
            definition,
            step,
            responses,
            status: progress.status,
        })
    }

    pub fn snapshot(&self) -> ExerciseProgress {
        ExerciseProgress {
            path_id: self.path_id.clone(),
            exercise_id: self.definition.id.clone(),
            step: self.step,
            responses: self.responses.clone(),
            status: self.status,
            updated_at: Timestamp::now(),
        }
    }

    pub fn path_id(&self) -> &PathId {
        &self.path_id
    }

    pub fn definition(&self) -> &ExerciseDefinition {
        &self.definition
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn status(&self) -> ExerciseStatus {
        self.status
    }

    pub fn is_last_step(&self) -> bool {
        self.step == self.definition.last_step()
    }

    pub fn response(&self, key: &str) -> Option<&FieldValue> {
        self.responses.get(key)
    }

    /// Records a value for a field on the current step.
    pub fn record(&mut self, key: &str, value: FieldValue) -> Result<(), ExerciseError> {
        self.ensure_editable()?;

        let field = self.definition.steps[self.step]
            .field(key)
            .ok_or_else(|| ExerciseError::UnknownField {
                step: self.step,
                field: key.to_string(),
            })?;

        match (&field.kind, &value) {
            (FieldKind::Slider { min, max }, FieldValue::Number(n)) => {
                if n < min || n > max {
                    return Err(ValidationError::out_of_range(key, *min, *max, *n).into());
                }
            }
            (FieldKind::Slider { .. }, FieldValue::Text(_)) => {
                return Err(ExerciseError::WrongValueKind {
                    field: key.to_string(),
                    expected: "a number",
                });
            }
            (FieldKind::Text { .. }, FieldValue::Number(_)) => {
                return Err(ExerciseError::WrongValueKind {
                    field: key.to_string(),
                    expected: "text",
                });
            }
            (FieldKind::Text { .. }, FieldValue::Text(_)) => {}
        }

        self.responses.insert(key.to_string(), value);
        Ok(())
    }

    /// Advances one step. Stays put on the last step.
    pub fn next(&mut self) -> Result<usize, ExerciseError> {
        self.ensure_editable()?;
        self.ensure_step_complete()?;
        if !self.is_last_step() {
            self.step += 1;
        }
        Ok(self.step)
    }

    /// Goes back one step, never below 0.
    pub fn prev(&mut self) -> Result<usize, ExerciseError> {
        self.ensure_editable()?;
        self.step = self.step.saturating_sub(1);
        Ok(self.step)
    }

    /// Finishes the exercise, producing its notebook entry.
    pub fn finish(&mut self) -> Result<NotebookEntry, ExerciseError> {
        self.ensure_editable()?;
        if !self.is_last_step() {
            return Err(ExerciseError::NotOnLastStep {
                step: self.step,
                last: self.definition.last_step(),
            });
        }
        self.ensure_step_complete()?;

        self.status = self.status.transition_to(ExerciseStatus::Saved)?;

        Ok(NotebookEntry::new(
            self.path_id.clone(),
            self.definition.id.clone(),
            self.definition.title.clone(),
            self.render_body(),
        ))
    }

    /// Required fields of the current step with no usable value.
    pub fn missing_required(&self) -> Vec<String> {
        self.definition.steps[self.step]
            .fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| self.responses.get(&f.key).map_or(true, FieldValue::is_blank))
            .map(|f| f.key.clone())
            .collect()
    }

    fn ensure_editable(&self) -> Result<(), ExerciseError> {
        if self.status.is_terminal() {
            return Err(ExerciseError::AlreadySaved);
        }
        Ok(())
    }

    fn ensure_step_complete(&self) -> Result<(), ExerciseError> {
        let fields = self.missing_required();
        if !fields.is_empty() {
            return Err(ExerciseError::RequiredFieldsMissing {
                step: self.step,
                fields,
            });
        }
        Ok(())
    }

    fn render_body(&self) -> String {
        let mut sections = Vec::new();
        for step in &self.definition.steps {
            let lines: Vec<String> = step
                .fields
                .iter()
                .filter_map(|field| {
                    let value = self.responses.get(&field.key)?;
                    if value.is_blank() {
                        return None;
                    }
                    Some(match (&field.kind, value) {
                        (FieldKind::Slider { max, .. }, FieldValue::Number(n)) => {
                            format!("{}: {}/{}", field.label, n, max)
                        }
                        _ => format!("{}: {}", field.label, value),
                    })
                })
                .collect();

            if !lines.is_empty() {
                sections.push(format!("{}\n{}", step.title, lines.join("\n")));
            }
        }
        sections.join("\n\n")
    }
}
