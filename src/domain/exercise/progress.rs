//! Exercise status and the resumable progress snapshot.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{ExerciseId, PathId, StateMachine, Timestamp};

/// Lifecycle of an exercise session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStatus {
    #[default]
    InProgress,
    Saved,
}

impl StateMachine for ExerciseStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            ExerciseStatus::InProgress => vec![ExerciseStatus::Saved],
            ExerciseStatus::Saved => vec![],
        }
    }
}

/// A recorded field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(i32),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// True for text that is empty after trimming.
    pub fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(t) if t.trim().is_empty())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(t) => f.write_str(t),
        }
    }
}

/// Serializable snapshot of an unfinished (or just saved) exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProgress {
    pub path_id: PathId,
    pub exercise_id: ExerciseId,
    pub step: usize,
    #[serde(default)]
    pub responses: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub status: ExerciseStatus,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_is_terminal() {
        assert!(ExerciseStatus::Saved.is_terminal());
        assert!(!ExerciseStatus::InProgress.is_terminal());
        assert!(ExerciseStatus::Saved
            .transition_to(ExerciseStatus::InProgress)
            .is_err());
    }

    #[test]
    fn field_values_deserialize_untagged() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[7, "hola"]"#).unwrap();
        assert_eq!(values, vec![FieldValue::Number(7), FieldValue::text("hola")]);
    }

    #[test]
    fn blank_only_applies_to_text() {
        assert!(FieldValue::text("  ").is_blank());
        assert!(!FieldValue::Number(0).is_blank());
    }

    #[test]
    fn progress_round_trips_through_yaml() {
        let mut responses = BTreeMap::new();
        responses.insert("situacion".to_string(), FieldValue::text("reunión"));
        let progress = ExerciseProgress {
            path_id: PathId::new("path-ansiedad").unwrap(),
            exercise_id: ExerciseId::new("registro-emociones").unwrap(),
            step: 1,
            responses,
            status: ExerciseStatus::InProgress,
            updated_at: Timestamp::now(),
        };

        let yaml = serde_yaml::to_string(&progress).unwrap();
        let back: ExerciseProgress = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, progress);
    }
}
