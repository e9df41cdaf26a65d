//! Dimension → path recommendation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::content::Catalog;
use crate::domain::assessment::{PriorityAreas, QuestionBank};
use crate::domain::foundation::{DimensionId, PathId};

/// Fallback table used when the question bank does not carry a path.
const DEFAULT_TABLE: &[(&str, &str)] = &[
    ("regulacion-emocional", "path-regulacion-emocional"),
    ("autoestima", "path-autoestima"),
    ("autocompasion", "path-autocompasion"),
    ("relaciones", "path-relaciones"),
    ("asertividad", "path-asertividad"),
    ("ansiedad-rasgo", "path-ansiedad"),
    ("resiliencia", "path-resiliencia"),
    ("proposito", "path-proposito"),
    ("atencion-plena", "path-atencion-plena"),
    ("sueno", "path-sueno"),
    ("rumiacion", "path-rumiacion"),
    ("estado-animo", "path-estado-animo"),
    ("ansiedad-estado", "path-ansiedad"),
];

/// A path offered for one priority area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSuggestion {
    pub dimension: String,
    pub path_id: PathId,
    pub path_title: String,
}

/// Pure lookup from dimension id to recommended path.
#[derive(Debug, Clone, Default)]
pub struct PathRecommender {
    table: HashMap<DimensionId, PathId>,
}

impl PathRecommender {
    /// The built-in table only.
    pub fn builtin() -> Self {
        let table = DEFAULT_TABLE
            .iter()
            .filter_map(|(dimension, path)| {
                Some((DimensionId::new(*dimension).ok()?, PathId::new(*path).ok()?))
            })
            .collect();
        Self { table }
    }

    /// The built-in table overridden by the bank's `recommendedPathId`s.
    pub fn from_bank(bank: &QuestionBank) -> Self {
        let mut recommender = Self::builtin();
        for dimension in bank.dimensions() {
            recommender
                .table
                .insert(dimension.id.clone(), dimension.recommended_path_id.clone());
        }
        recommender
    }

    pub fn recommended_path_for(&self, dimension: &DimensionId) -> Option<&PathId> {
        self.table.get(dimension)
    }

    /// Maps each priority area (a dimension name) to a path, in priority order.
    ///
    /// Names with no dimension in the bank, no path in the table, or a path
    /// missing from the catalog are skipped with a warning.
    pub fn suggestions_for(
        &self,
        priority_areas: &PriorityAreas,
        bank: &QuestionBank,
        catalog: &Catalog,
    ) -> Vec<PathSuggestion> {
        priority_areas
            .iter()
            .filter_map(|name| {
                let Some(dimension) = bank.by_name(name) else {
                    tracing::warn!(dimension = %name, "Priority area matches no dimension");
                    return None;
                };
                let Some(path_id) = self.recommended_path_for(&dimension.id) else {
                    tracing::warn!(dimension_id = %dimension.id, "No path configured for dimension");
                    return None;
                };
                let Some(path) = catalog.path(path_id) else {
                    tracing::warn!(path_id = %path_id, "Recommended path not in catalog");
                    return None;
                };
                Some(PathSuggestion {
                    dimension: name.clone(),
                    path_id: path.id.clone(),
                    path_title: path.title.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{Dimension, Item};
    use crate::domain::foundation::ItemId;

    fn dimension(id: &str, name: &str, path: &str) -> Dimension {
        Dimension {
            id: DimensionId::new(id).unwrap(),
            name: name.to_string(),
            definition: String::new(),
            recommended_path_id: PathId::new(path).unwrap(),
            items: vec![Item::new(ItemId::new(format!("{}-1", id)).unwrap(), "¿...?")],
        }
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            dimension("autoestima", "Autoestima", "path-autoestima"),
            dimension("sueno", "Sueño y Descanso", "path-sueno"),
            dimension("ansiedad-estado", "Ansiedad Estado", "path-ansiedad"),
            dimension("nueva", "Dimensión Nueva", "path-inexistente"),
        ])
        .unwrap()
    }

    fn areas(names: [&str; 3]) -> PriorityAreas {
        PriorityAreas::new(names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn builtin_table_covers_thirteen_dimensions() {
        let recommender = PathRecommender::builtin();
        assert_eq!(recommender.table.len(), 13);
        assert_eq!(
            recommender
                .recommended_path_for(&DimensionId::new("ansiedad-estado").unwrap())
                .map(PathId::as_str),
            Some("path-ansiedad")
        );
    }

    #[test]
    fn unknown_dimension_has_no_path() {
        let recommender = PathRecommender::builtin();
        assert!(recommender
            .recommended_path_for(&DimensionId::new("desconocida").unwrap())
            .is_none());
    }

    #[test]
    fn bank_entries_override_defaults() {
        let bank = QuestionBank::new(vec![dimension("sueno", "Sueño", "path-otro")]).unwrap();
        let recommender = PathRecommender::from_bank(&bank);
        assert_eq!(
            recommender
                .recommended_path_for(&DimensionId::new("sueno").unwrap())
                .map(PathId::as_str),
            Some("path-otro")
        );
    }

    #[test]
    fn suggestions_follow_priority_order() {
        let bank = bank();
        let catalog = Catalog::builtin().unwrap();
        let recommender = PathRecommender::from_bank(&bank);

        let suggestions = recommender.suggestions_for(
            &areas(["Sueño y Descanso", "Autoestima", "Ansiedad Estado"]),
            &bank,
            &catalog,
        );

        let ids: Vec<&str> = suggestions.iter().map(|s| s.path_id.as_str()).collect();
        assert_eq!(ids, vec!["path-sueno", "path-autoestima", "path-ansiedad"]);
        assert_eq!(suggestions[0].path_title, "Dormir mejor");
    }

    #[test]
    fn suggestions_skip_unresolvable_areas() {
        let bank = bank();
        let catalog = Catalog::builtin().unwrap();
        let recommender = PathRecommender::from_bank(&bank);

        let suggestions = recommender.suggestions_for(
            &areas(["Autoestima", "Dimensión Nueva", "No Existe"]),
            &bank,
            &catalog,
        );

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].dimension, "Autoestima");
    }
}
