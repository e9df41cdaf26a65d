//! Content catalog: paths, weekly modules, content blocks and recommendations.

mod content;
mod path;
mod recommender;

pub use content::{Catalog, CatalogError};
pub use path::{ContentBlock, Path, WeekModule};
pub use recommender::{PathRecommender, PathSuggestion};
