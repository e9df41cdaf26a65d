//! Interpretation value objects: emotional profile, priority areas, feedback.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{Score, ValidationError};

/// Dimension display name → score on the 1.0 to 5.0 scale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionalProfile(BTreeMap<String, Score>);

impl EmotionalProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dimension: impl Into<String>, score: Score) {
        self.0.insert(dimension.into(), score);
    }

    pub fn get(&self, dimension: &str) -> Option<Score> {
        self.0.get(dimension).copied()
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.0.contains_key(dimension)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Score)> {
        self.0.iter()
    }

    /// Names from `expected` with no entry in this profile, in `expected` order.
    pub fn missing_from<'a>(&self, expected: &'a [String]) -> Vec<&'a str> {
        expected
            .iter()
            .filter(|name| !self.0.contains_key(name.as_str()))
            .map(|name| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Score)> for EmotionalProfile {
    fn from_iter<I: IntoIterator<Item = (String, Score)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The three dimensions that most warrant the user's attention, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PriorityAreas([String; 3]);

impl PriorityAreas {
    /// Number of priority areas an interpretation must name.
    pub const COUNT: usize = 3;

    /// Creates priority areas, requiring exactly three non-empty names.
    pub fn new(areas: Vec<String>) -> Result<Self, ValidationError> {
        if areas.len() != Self::COUNT {
            return Err(ValidationError::out_of_range(
                "priority_areas",
                Self::COUNT as i32,
                Self::COUNT as i32,
                areas.len() as i32,
            ));
        }
        if let Some(index) = areas.iter().position(|a| a.trim().is_empty()) {
            return Err(ValidationError::empty_field(format!(
                "priority_areas[{}]",
                index
            )));
        }
        let [first, second, third]: [String; 3] = areas
            .try_into()
            .map_err(|_| ValidationError::invalid_format("priority_areas", "expected 3 entries"))?;
        Ok(Self([first, second, third]))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl TryFrom<Vec<String>> for PriorityAreas {
    type Error = ValidationError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PriorityAreas> for Vec<String> {
    fn from(areas: PriorityAreas) -> Self {
        areas.0.into()
    }
}

/// Natural-language (Spanish) summary of the profile. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Feedback(String);

impl Feedback {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("feedback"));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Feedback {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Feedback> for String {
    fn from(feedback: Feedback) -> Self {
        feedback.0
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated output of a profile interpreter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub emotional_profile: EmotionalProfile,
    pub priority_areas: PriorityAreas,
    pub feedback: Feedback,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn areas(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn priority_areas_require_exactly_three() {
        assert!(PriorityAreas::new(areas(&["A", "B"])).is_err());
        assert!(PriorityAreas::new(areas(&["A", "B", "C", "D"])).is_err());
        assert!(PriorityAreas::new(areas(&["A", "B", "C"])).is_ok());
    }

    #[test]
    fn priority_areas_reject_blank_entries_by_index() {
        let err = PriorityAreas::new(areas(&["A", " ", "C"])).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("priority_areas[1]"));
    }

    #[test]
    fn priority_areas_serialize_as_array() {
        let priority = PriorityAreas::new(areas(&["A", "B", "C"])).unwrap();
        assert_eq!(serde_json::to_string(&priority).unwrap(), r#"["A","B","C"]"#);
        assert!(serde_json::from_str::<PriorityAreas>(r#"["A"]"#).is_err());
    }

    #[test]
    fn feedback_rejects_blank_text() {
        assert!(Feedback::new("   ").is_err());
        assert_eq!(Feedback::new("Buen trabajo").unwrap().as_str(), "Buen trabajo");
    }

    #[test]
    fn missing_from_preserves_expected_order() {
        let mut profile = EmotionalProfile::new();
        profile.insert("Autoestima", Score::try_new(3.0).unwrap());

        let expected = areas(&["Resiliencia", "Autoestima", "Sueño y Descanso"]);

        assert_eq!(profile.missing_from(&expected), vec!["Resiliencia", "Sueño y Descanso"]);
    }

    #[test]
    fn profile_deserialization_enforces_score_range() {
        assert!(serde_json::from_str::<EmotionalProfile>(r#"{"A": 4.2}"#).is_ok());
        assert!(serde_json::from_str::<EmotionalProfile>(r#"{"A": 7}"#).is_err());
    }
}
