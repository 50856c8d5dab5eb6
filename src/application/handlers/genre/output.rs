use serde::Serialize;
use std::collections::HashMap;

use crate::application::handlers::RelatedOutput;
use crate::domain::foundation::{AggregateRoot, CategoryId, GenreId, Timestamp};
use crate::domain::genre::Genre;

/// Genre as returned by every genre handler.
///
/// Categories are listed in id order. Names are filled only by handlers that
/// look them up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreOutput {
    pub id: GenreId,
    pub name: String,
    pub is_active: bool,
    pub categories: Vec<RelatedOutput<CategoryId>>,
    pub created_at: Timestamp,
}

impl GenreOutput {
    /// Attaches names from `names`; ids missing from it keep `None`.
    pub fn with_category_names(mut self, names: &HashMap<CategoryId, String>) -> Self {
        for category in &mut self.categories {
            category.name = names.get(&category.id).cloned();
        }
        self
    }

    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

impl From<&Genre> for GenreOutput {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id(),
            name: genre.name().to_string(),
            is_active: genre.is_active(),
            categories: genre
                .categories_id()
                .iter()
                .copied()
                .map(RelatedOutput::unnamed)
                .collect(),
            created_at: genre.created_at(),
        }
    }
}
