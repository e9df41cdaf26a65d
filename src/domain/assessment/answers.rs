//! Answer sheet: the complete set of Likert responses for one assessment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{ItemId, LikertAnswer, ValidationError};

/// Item id → Likert response. The sole input to scoring besides the bank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(HashMap<ItemId, LikertAnswer>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or overwrites) the answer for an item.
    pub fn record(&mut self, item: ItemId, raw: i64) -> Result<(), ValidationError> {
        let answer = LikertAnswer::new(raw).map_err(|_| {
            ValidationError::out_of_range(format!("answers[{}]", item), 1, 5, raw as i32)
        })?;
        self.0.insert(item, answer);
        Ok(())
    }

    /// Builder form of [`record`](Self::record).
    pub fn with(mut self, item: &str, raw: i64) -> Result<Self, ValidationError> {
        self.record(ItemId::new(item)?, raw)?;
        Ok(self)
    }

    /// Builds a sheet from raw `item id → integer` pairs, validating each.
    pub fn from_raw<I, K>(raw: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let mut sheet = Self::new();
        for (item, value) in raw {
            sheet.record(ItemId::new(item)?, value)?;
        }
        Ok(sheet)
    }

    pub fn get(&self, item: &ItemId) -> Option<LikertAnswer> {
        self.0.get(item).copied()
    }

    pub fn contains(&self, item: &ItemId) -> bool {
        self.0.contains_key(item)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_validates_range_and_names_item() {
        let mut sheet = AnswerSheet::new();
        let err = sheet.record(ItemId::new("EA1").unwrap(), 0).unwrap_err();
        assert_eq!(err.field(), "answers[EA1]");
        assert!(sheet.is_empty());
    }

    #[test]
    fn record_overwrites_previous_answer() {
        let sheet = AnswerSheet::new().with("EA1", 2).unwrap().with("EA1", 4).unwrap();
        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.get(&ItemId::new("EA1").unwrap()).unwrap().value(), 4);
    }

    #[test]
    fn from_raw_collects_all_answers() {
        let sheet = AnswerSheet::from_raw(vec![("A", 1), ("B", 5)]).unwrap();
        assert_eq!(sheet.len(), 2);
        assert!(sheet.contains(&ItemId::new("B").unwrap()));
    }

    #[test]
    fn deserializes_from_json_map_with_validation() {
        let sheet: AnswerSheet = serde_json::from_str(r#"{"A1": 3, "A2": 5}"#).unwrap();
        assert_eq!(sheet.len(), 2);

        assert!(serde_json::from_str::<AnswerSheet>(r#"{"A1": 6}"#).is_err());
    }
}
