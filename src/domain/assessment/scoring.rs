//! Scoring Engine - converts Likert answers into per-dimension scores.
//!
//! Two aggregation rules apply:
//!
//! - **Trait dimensions**: each answered item contributes `raw × weight`, or
//!   `(6 - raw) × weight` when the item is inverse. The score is the mean of
//!   the contributions.
//! - **State dimensions** (mood, state anxiety): contributions are `raw × weight`
//!   with no reflection. Their sum is rescaled linearly from `[n, 5n]` (n =
//!   items aggregated, unit weights assumed) onto `[1, 5]` and then inverted
//!   (`6 - rescaled`) so that higher always means more wellbeing.
//!
//! Scores are rounded to one decimal. The engine is pure: no I/O, no clock.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::answers::AnswerSheet;
use super::dimension::{Dimension, DimensionKind, QuestionBank};
use super::profile::EmotionalProfile;
use crate::domain::foundation::{round_one_decimal, DimensionId, ItemId, LikertAnswer, Score};

/// What to do with items that have no answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnansweredPolicy {
    /// Leave the item out of its dimension's aggregate.
    #[default]
    Skip,
    /// Fail scoring, listing every unanswered item.
    Reject,
}

/// Rules that parameterise the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Dimension ids or names (case-insensitive) scored with the state rule.
    pub state_dimensions: Vec<String>,
    pub unanswered: UnansweredPolicy,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            state_dimensions: default_state_dimensions(),
            unanswered: UnansweredPolicy::Skip,
        }
    }
}

/// Mood and state-anxiety, by id and by display name.
pub fn default_state_dimensions() -> Vec<String> {
    ["estado-animo", "ansiedad-estado", "Estado de Ánimo", "Ansiedad Estado"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ScoringRules {
    /// Classifies a dimension as trait or state.
    pub fn kind_of(&self, dimension: &Dimension) -> DimensionKind {
        let id = dimension.id.as_str().to_lowercase();
        let name = dimension.name.to_lowercase();
        let is_state = self.state_dimensions.iter().any(|key| {
            let key = key.to_lowercase();
            key == id || key == name
        });
        if is_state {
            DimensionKind::State
        } else {
            DimensionKind::Trait
        }
    }
}

/// Score for a single dimension, with the intermediate aggregate kept for diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension_id: DimensionId,
    pub name: String,
    pub kind: DimensionKind,
    /// Number of answered items that entered the aggregate.
    pub items_scored: usize,
    /// Weighted mean (trait) or weighted sum (state) before rescaling/rounding.
    pub raw_aggregate: f64,
    pub score: Score,
}

/// Result of scoring one answer sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProfile {
    /// Scored dimensions, in question bank order.
    pub scores: Vec<DimensionScore>,
    /// Dimensions with no answered item.
    pub unscored: Vec<DimensionId>,
}

impl ScoredProfile {
    /// Finds a score by dimension display name.
    pub fn by_name(&self, name: &str) -> Option<&DimensionScore> {
        self.scores.iter().find(|s| s.name == name)
    }

    /// Projects the scores onto a name → score map.
    pub fn to_emotional_profile(&self) -> EmotionalProfile {
        self.scores
            .iter()
            .map(|s| (s.name.clone(), s.score))
            .collect()
    }

    /// Returns the `n` lowest-scoring dimensions, ties kept in bank order.
    pub fn lowest(&self, n: usize) -> Vec<&DimensionScore> {
        let mut ranked: Vec<&DimensionScore> = self.scores.iter().collect();
        // sort_by is stable, so equal scores keep question bank order.
        ranked.sort_by(|a, b| a.score.value().total_cmp(&b.score.value()));
        ranked.truncate(n);
        ranked
    }
}

/// Scoring failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("{} item(s) have no answer: {}", .0.len(), join_ids(.0))]
    MissingAnswers(Vec<ItemId>),
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter().map(|i| i.as_str()).collect::<Vec<_>>().join(", ")
}

/// Deterministic scoring engine.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    rules: ScoringRules,
}

impl ScoringEngine {
    pub fn new(rules: ScoringRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    /// Scores every dimension of the bank against the answer sheet.
    pub fn score(
        &self,
        bank: &QuestionBank,
        answers: &AnswerSheet,
    ) -> Result<ScoredProfile, ScoringError> {
        if self.rules.unanswered == UnansweredPolicy::Reject {
            let missing: Vec<ItemId> = bank
                .items()
                .filter(|(_, item)| !answers.contains(&item.id))
                .map(|(_, item)| item.id.clone())
                .collect();
            if !missing.is_empty() {
                return Err(ScoringError::MissingAnswers(missing));
            }
        }

        for item_id in answers.item_ids() {
            if !bank.items().any(|(_, item)| &item.id == item_id) {
                tracing::debug!(item_id = %item_id, "Ignoring answer for unknown item");
            }
        }

        let mut scores = Vec::with_capacity(bank.len());
        let mut unscored = Vec::new();

        for dimension in bank.dimensions() {
            match self.score_dimension(dimension, answers) {
                Some(score) => scores.push(score),
                None => {
                    tracing::warn!(
                        dimension = %dimension.id,
                        "Dimension has no answered items; leaving it unscored"
                    );
                    unscored.push(dimension.id.clone());
                }
            }
        }

        Ok(ScoredProfile { scores, unscored })
    }

    /// Scores a single dimension. Returns `None` when no item was answered.
    pub fn score_dimension(
        &self,
        dimension: &Dimension,
        answers: &AnswerSheet,
    ) -> Option<DimensionScore> {
        let kind = self.rules.kind_of(dimension);
        let answered: Vec<(LikertAnswer, f64, bool)> = dimension
            .items
            .iter()
            .filter_map(|item| {
                answers
                    .get(&item.id)
                    .map(|answer| (answer, item.weight, item.is_inverse))
            })
            .collect();

        if answered.is_empty() {
            return None;
        }

        let n = answered.len();
        let (raw_aggregate, unclamped) = match kind {
            DimensionKind::Trait => {
                let mean = answered
                    .iter()
                    .map(|&(answer, weight, inverse)| trait_contribution(answer, weight, inverse))
                    .sum::<f64>()
                    / n as f64;
                (mean, mean)
            }
            DimensionKind::State => {
                let sum: f64 = answered
                    .iter()
                    .map(|&(answer, weight, _)| f64::from(answer.value()) * weight)
                    .sum();
                (sum, state_score(sum, n))
            }
        };

        let rounded = round_one_decimal(unclamped);
        if !Score::in_range(rounded) {
            tracing::warn!(
                dimension = %dimension.id,
                value = unclamped,
                "Dimension score outside [1, 5]; clamping"
            );
        }

        Some(DimensionScore {
            dimension_id: dimension.id.clone(),
            name: dimension.name.clone(),
            kind,
            items_scored: n,
            raw_aggregate,
            score: Score::clamped(unclamped),
        })
    }
}

/// Contribution of one trait item: reflected when inverse, then weighted.
pub fn trait_contribution(answer: LikertAnswer, weight: f64, inverse: bool) -> f64 {
    let value = if inverse {
        answer.reflected()
    } else {
        answer.value()
    };
    f64::from(value) * weight
}

/// Rescales a state-dimension sum over `n` items onto [1, 5] and inverts it.
pub fn state_score(sum: f64, n: usize) -> f64 {
    let min = n as f64 * f64::from(LikertAnswer::MIN);
    let max = n as f64 * f64::from(LikertAnswer::MAX);
    let rescaled = ((sum - min) / (max - min)) * 4.0 + 1.0;
    6.0 - rescaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::dimension::Item;
    use crate::domain::foundation::PathId;
    use proptest::prelude::*;

    fn item(id: &str) -> Item {
        Item::new(ItemId::new(id).unwrap(), "¿?")
    }

    fn dimension(id: &str, name: &str, items: Vec<Item>) -> Dimension {
        Dimension {
            id: DimensionId::new(id).unwrap(),
            name: name.to_string(),
            definition: String::new(),
            recommended_path_id: PathId::new(format!("path-{}", id)).unwrap(),
            items,
        }
    }

    fn numbered_items(prefix: &str, count: usize) -> Vec<Item> {
        (1..=count).map(|i| item(&format!("{}{}", prefix, i))).collect()
    }

    fn uniform_answers(prefix: &str, count: usize, value: i64) -> AnswerSheet {
        AnswerSheet::from_raw((1..=count).map(|i| (format!("{}{}", prefix, i), value))).unwrap()
    }

    fn score_of(bank: &QuestionBank, answers: &AnswerSheet, name: &str) -> f64 {
        ScoringEngine::default()
            .score(bank, answers)
            .unwrap()
            .by_name(name)
            .unwrap()
            .score
            .value()
    }

    #[test]
    fn all_threes_on_unit_weight_trait_dimension_scores_three() {
        let bank = QuestionBank::new(vec![dimension(
            "autoestima",
            "Autoestima",
            numbered_items("AE", 5),
        )])
        .unwrap();

        let answers = uniform_answers("AE", 5, 3);

        assert_eq!(score_of(&bank, &answers, "Autoestima"), 3.0);
    }

    #[test]
    fn inverse_and_normal_fives_average_to_three() {
        let bank = QuestionBank::new(vec![dimension(
            "regulacion",
            "Regulación Emocional y Estrés",
            vec![item("RE1").inverse(), item("RE2")],
        )])
        .unwrap();
        let answers = AnswerSheet::new().with("RE1", 5).unwrap().with("RE2", 5).unwrap();

        assert_eq!(score_of(&bank, &answers, "Regulación Emocional y Estrés"), 3.0);
    }

    #[test]
    fn inverse_contribution_reflects_before_weighting() {
        let one = LikertAnswer::new(1).unwrap();
        let five = LikertAnswer::new(5).unwrap();
        assert_eq!(trait_contribution(one, 1.0, true), 5.0);
        assert_eq!(trait_contribution(five, 1.0, true), 1.0);
        assert_eq!(trait_contribution(one, 2.0, true), 10.0);
        assert_eq!(trait_contribution(five, 0.5, false), 2.5);
    }

    #[test]
    fn state_anxiety_boundaries() {
        let bank = QuestionBank::new(vec![dimension(
            "ansiedad-estado",
            "Ansiedad Estado",
            numbered_items("AS", 6),
        )])
        .unwrap();

        assert_eq!(score_of(&bank, &uniform_answers("AS", 6, 1), "Ansiedad Estado"), 5.0);
        assert_eq!(score_of(&bank, &uniform_answers("AS", 6, 5), "Ansiedad Estado"), 1.0);
    }

    #[test]
    fn mood_boundaries() {
        let bank = QuestionBank::new(vec![dimension(
            "estado-animo",
            "Estado de Ánimo",
            numbered_items("EA", 12),
        )])
        .unwrap();

        assert_eq!(score_of(&bank, &uniform_answers("EA", 12, 1), "Estado de Ánimo"), 5.0);
        assert_eq!(score_of(&bank, &uniform_answers("EA", 12, 5), "Estado de Ánimo"), 1.0);
    }

    #[test]
    fn mood_midpoint_is_three() {
        let bank = QuestionBank::new(vec![dimension(
            "estado-animo",
            "Estado de Ánimo",
            numbered_items("EA", 12),
        )])
        .unwrap();

        // sum = 36 → rescaled 3.0 → inverted 3.0
        assert_eq!(score_of(&bank, &uniform_answers("EA", 12, 3), "Estado de Ánimo"), 3.0);
    }

    #[test]
    fn state_rule_ignores_inverse_flag() {
        let bank = QuestionBank::new(vec![dimension(
            "ansiedad-estado",
            "Ansiedad Estado",
            vec![item("AS1").inverse(), item("AS2")],
        )])
        .unwrap();
        let answers = uniform_answers("AS", 2, 1);

        assert_eq!(score_of(&bank, &answers, "Ansiedad Estado"), 5.0);
    }

    #[test]
    fn state_dimensions_match_by_name_case_insensitively() {
        let rules = ScoringRules::default();
        let by_name = dimension("x1", "ANSIEDAD ESTADO", vec![]);
        let by_id = dimension("Estado-Animo", "Humor", vec![]);
        let other = dimension("autoestima", "Autoestima", vec![]);

        assert_eq!(rules.kind_of(&by_name), DimensionKind::State);
        assert_eq!(rules.kind_of(&by_id), DimensionKind::State);
        assert_eq!(rules.kind_of(&other), DimensionKind::Trait);
    }

    #[test]
    fn unanswered_items_are_skipped_by_default() {
        let bank = QuestionBank::new(vec![dimension(
            "autoestima",
            "Autoestima",
            numbered_items("AE", 3),
        )])
        .unwrap();
        let answers = AnswerSheet::new().with("AE1", 4).unwrap().with("AE2", 2).unwrap();

        let profile = ScoringEngine::default().score(&bank, &answers).unwrap();
        let score = profile.by_name("Autoestima").unwrap();

        assert_eq!(score.items_scored, 2);
        assert_eq!(score.score.value(), 3.0);
    }

    #[test]
    fn state_rescale_uses_answered_item_count() {
        let bank = QuestionBank::new(vec![dimension(
            "ansiedad-estado",
            "Ansiedad Estado",
            numbered_items("AS", 6),
        )])
        .unwrap();
        let answers = uniform_answers("AS", 3, 5);

        assert_eq!(score_of(&bank, &answers, "Ansiedad Estado"), 1.0);
    }

    #[test]
    fn reject_policy_lists_unanswered_items() {
        let bank = QuestionBank::new(vec![dimension(
            "autoestima",
            "Autoestima",
            numbered_items("AE", 3),
        )])
        .unwrap();
        let answers = AnswerSheet::new().with("AE2", 4).unwrap();
        let engine = ScoringEngine::new(ScoringRules {
            unanswered: UnansweredPolicy::Reject,
            ..ScoringRules::default()
        });

        let err = engine.score(&bank, &answers).unwrap_err();

        assert_eq!(
            err,
            ScoringError::MissingAnswers(vec![
                ItemId::new("AE1").unwrap(),
                ItemId::new("AE3").unwrap()
            ])
        );
        assert_eq!(err.to_string(), "2 item(s) have no answer: AE1, AE3");
    }

    #[test]
    fn dimension_without_answers_is_reported_unscored() {
        let bank = QuestionBank::new(vec![
            dimension("autoestima", "Autoestima", numbered_items("AE", 2)),
            dimension("resiliencia", "Resiliencia", numbered_items("RS", 2)),
        ])
        .unwrap();
        let answers = uniform_answers("AE", 2, 4);

        let profile = ScoringEngine::default().score(&bank, &answers).unwrap();

        assert_eq!(profile.scores.len(), 1);
        assert_eq!(profile.unscored, vec![DimensionId::new("resiliencia").unwrap()]);
        assert_eq!(profile.to_emotional_profile().len(), 1);
    }

    #[test]
    fn heavy_weights_are_clamped_into_range() {
        let bank = QuestionBank::new(vec![dimension(
            "autoestima",
            "Autoestima",
            vec![item("AE1").with_weight(3.0)],
        )])
        .unwrap();
        let answers = AnswerSheet::new().with("AE1", 5).unwrap();

        let profile = ScoringEngine::default().score(&bank, &answers).unwrap();
        let score = &profile.scores[0];

        assert_eq!(score.raw_aggregate, 15.0);
        assert_eq!(score.score.value(), 5.0);
    }

    #[test]
    fn scores_are_rounded_to_one_decimal() {
        let bank = QuestionBank::new(vec![dimension(
            "autoestima",
            "Autoestima",
            numbered_items("AE", 3),
        )])
        .unwrap();
        let answers = AnswerSheet::from_raw(vec![("AE1", 4), ("AE2", 4), ("AE3", 3)]).unwrap();

        // mean = 11 / 3 = 3.666…
        assert_eq!(score_of(&bank, &answers, "Autoestima"), 3.7);
    }

    #[test]
    fn lowest_orders_by_score_then_bank_order() {
        let bank = QuestionBank::new(vec![
            dimension("a", "A", numbered_items("A", 1)),
            dimension("b", "B", numbered_items("B", 1)),
            dimension("c", "C", numbered_items("C", 1)),
            dimension("d", "D", numbered_items("D", 1)),
        ])
        .unwrap();
        let answers =
            AnswerSheet::from_raw(vec![("A1", 4), ("B1", 2), ("C1", 4), ("D1", 2)]).unwrap();

        let profile = ScoringEngine::default().score(&bank, &answers).unwrap();
        let names: Vec<&str> = profile.lowest(3).iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, vec!["B", "D", "A"]);
    }

    proptest! {
        #[test]
        fn trait_scores_stay_in_range(
            raw in proptest::collection::vec(1i64..=5, 1..12),
            inverse in proptest::collection::vec(any::<bool>(), 12),
        ) {
            let items: Vec<Item> = raw
                .iter()
                .enumerate()
                .map(|(i, _)| {
                    let it = item(&format!("T{}", i));
                    if inverse[i] { it.inverse() } else { it }
                })
                .collect();
            let bank = QuestionBank::new(vec![dimension("t", "Rasgo", items)]).unwrap();
            let answers = AnswerSheet::from_raw(
                raw.iter().enumerate().map(|(i, v)| (format!("T{}", i), *v)),
            )
            .unwrap();

            let profile = ScoringEngine::default().score(&bank, &answers).unwrap();
            let value = profile.scores[0].score.value();
            prop_assert!((1.0..=5.0).contains(&value));
            prop_assert!((1.0..=5.0).contains(&profile.scores[0].raw_aggregate));
        }

        #[test]
        fn state_scores_stay_in_range(raw in proptest::collection::vec(1i64..=5, 1..13)) {
            let items: Vec<Item> = (0..raw.len()).map(|i| item(&format!("S{}", i))).collect();
            let bank = QuestionBank::new(vec![dimension("estado-animo", "Estado de Ánimo", items)]).unwrap();
            let answers = AnswerSheet::from_raw(
                raw.iter().enumerate().map(|(i, v)| (format!("S{}", i), *v)),
            )
            .unwrap();

            let profile = ScoringEngine::default().score(&bank, &answers).unwrap();
            let unclamped = state_score(profile.scores[0].raw_aggregate, raw.len());
            prop_assert!((1.0..=5.0).contains(&unclamped));
        }
    }
}
