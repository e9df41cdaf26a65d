//! The content catalog: every path and exercise definition the app ships.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use super::path::Path;
use crate::domain::exercise::ExerciseDefinition;
use crate::domain::foundation::{ExerciseId, PathId, ValidationError};

static BUILTIN_YAML: &str = include_str!("builtin_catalog.yaml");

static BUILTIN: Lazy<Result<Catalog, CatalogError>> =
    Lazy::new(|| Catalog::from_yaml_str(BUILTIN_YAML));

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("Catalog document is not valid YAML: {0}")]
    Parse(String),

    #[error("Duplicate path id '{0}'")]
    DuplicatePath(PathId),

    #[error("Duplicate exercise id '{0}'")]
    DuplicateExercise(ExerciseId),

    #[error("Path '{path}' weeks must be numbered 1, 2, 3...: found {found} at position {position}")]
    WeekOrder {
        path: PathId,
        position: usize,
        found: u32,
    },

    #[error("Path '{path}' references unknown exercise '{exercise}'")]
    UnknownExercise { path: PathId, exercise: ExerciseId },

    #[error(transparent)]
    Exercise(#[from] ValidationError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    paths: Vec<Path>,
    #[serde(default)]
    exercises: Vec<ExerciseDefinition>,
}

impl Catalog {
    /// Builds a validated catalog.
    pub fn new(paths: Vec<Path>, exercises: Vec<ExerciseDefinition>) -> Result<Self, CatalogError> {
        let catalog = Self { paths, exercises };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a YAML catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        (*BUILTIN).clone()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut exercise_ids = HashSet::new();
        for exercise in &self.exercises {
            if !exercise_ids.insert(&exercise.id) {
                return Err(CatalogError::DuplicateExercise(exercise.id.clone()));
            }
            exercise.validate()?;
        }

        let mut path_ids = HashSet::new();
        for path in &self.paths {
            if !path_ids.insert(&path.id) {
                return Err(CatalogError::DuplicatePath(path.id.clone()));
            }

            for (position, week) in path.weeks.iter().enumerate() {
                if week.week as usize != position + 1 {
                    return Err(CatalogError::WeekOrder {
                        path: path.id.clone(),
                        position,
                        found: week.week,
                    });
                }
            }

            if let Some(missing) = path.exercise_ids().find(|id| !exercise_ids.contains(id)) {
                return Err(CatalogError::UnknownExercise {
                    path: path.id.clone(),
                    exercise: missing.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn path(&self, id: &PathId) -> Option<&Path> {
        self.paths.iter().find(|p| &p.id == id)
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn exercise(&self, id: &ExerciseId) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|e| &e.id == id)
    }

    pub fn exercises(&self) -> &[ExerciseDefinition] {
        &self.exercises
    }
}
