//! Path documents: multi-week programs made of typed content blocks.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DimensionId, ExerciseId, PathId};

/// One unit of path content.
///
/// The set of block kinds is closed; an unknown `type` tag fails
/// deserialization instead of rendering as nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Heading { text: String },
    Paragraph { text: String },
    List { items: Vec<String> },
    Quote {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        author: Option<String>,
    },
    Audio {
        title: String,
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_secs: Option<u32>,
    },
    Exercise { exercise_id: ExerciseId },
}

impl ContentBlock {
    pub fn exercise_id(&self) -> Option<&ExerciseId> {
        match self {
            ContentBlock::Exercise { exercise_id } => Some(exercise_id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekModule {
    pub week: u32,
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub id: PathId,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Dimensions this path is designed to work on.
    #[serde(default)]
    pub dimensions: Vec<DimensionId>,
    pub weeks: Vec<WeekModule>,
}

impl Path {
    /// Every exercise referenced by the path, in reading order.
    pub fn exercise_ids(&self) -> impl Iterator<Item = &ExerciseId> {
        self.weeks
            .iter()
            .flat_map(|w| w.blocks.iter())
            .filter_map(ContentBlock::exercise_id)
    }

    pub fn week(&self, number: u32) -> Option<&WeekModule> {
        self.weeks.iter().find(|w| w.week == number)
    }
}
