//! Question bank types: dimensions and their Likert items.
//!
//! The shape mirrors the external question bank JSON (camelCase keys).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::{DimensionId, ItemId, PathId, ValidationError};

/// A single Likert-scale question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub text: String,
    /// Multiplier applied to the (possibly reflected) answer before aggregation.
    pub weight: f64,
    /// Reflect the raw answer (`6 - raw`) before weighting. Trait dimensions only.
    #[serde(default)]
    pub is_inverse: bool,
}

impl Item {
    /// Creates a unit-weight, non-inverse item.
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            weight: 1.0,
            is_inverse: false,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Marks the item as inverse.
    pub fn inverse(mut self) -> Self {
        self.is_inverse = true;
        self
    }
}

/// A named psychological construct measured by a group of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: DimensionId,
    pub name: String,
    #[serde(default)]
    pub definition: String,
    pub recommended_path_id: PathId,
    pub items: Vec<Item>,
}

/// How a dimension's items are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    /// Weighted mean of item contributions, inverse items reflected.
    Trait,
    /// Weighted sum rescaled to 1-5, then inverted.
    State,
}

/// The full, validated set of dimensions for one assessment session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QuestionBank(Vec<Dimension>);

impl QuestionBank {
    /// Validates and wraps a list of dimensions.
    ///
    /// Rejects blank dimension names, duplicate dimension ids, duplicate item ids
    /// across the bank and non-finite or negative weights.
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self, ValidationError> {
        let mut dimension_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        for dimension in &dimensions {
            if dimension.name.trim().is_empty() {
                return Err(ValidationError::empty_field(format!(
                    "dimensions[{}].name",
                    dimension.id
                )));
            }
            if !dimension_ids.insert(dimension.id.clone()) {
                return Err(ValidationError::invalid_format(
                    "dimensions",
                    format!("duplicate dimension id '{}'", dimension.id),
                ));
            }
            for item in &dimension.items {
                if !item_ids.insert(item.id.clone()) {
                    return Err(ValidationError::invalid_format(
                        "items",
                        format!("duplicate item id '{}'", item.id),
                    ));
                }
                if !item.weight.is_finite() || item.weight < 0.0 {
                    return Err(ValidationError::invalid_format(
                        format!("items[{}].weight", item.id),
                        format!("weight must be a non-negative number, got {}", item.weight),
                    ));
                }
            }
        }

        Ok(Self(dimensions))
    }

    /// Returns the dimensions in source order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.0
    }

    /// Returns every dimension display name in source order.
    pub fn dimension_names(&self) -> Vec<String> {
        self.0.iter().map(|d| d.name.clone()).collect()
    }

    /// Finds a dimension by its display name.
    pub fn by_name(&self, name: &str) -> Option<&Dimension> {
        self.0.iter().find(|d| d.name == name)
    }

    /// Iterates over every item paired with its dimension.
    pub fn items(&self) -> impl Iterator<Item = (&Dimension, &Item)> {
        self.0
            .iter()
            .flat_map(|d| d.items.iter().map(move |item| (d, item)))
    }

    /// Total number of items across all dimensions.
    pub fn item_count(&self) -> usize {
        self.0.iter().map(|d| d.items.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for QuestionBank {
    type Item = Dimension;
    type IntoIter = std::vec::IntoIter<Dimension>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
