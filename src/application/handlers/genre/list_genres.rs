//! ListGenresHandler - Paged genre listing with category names.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::GenreOutput;
use crate::domain::foundation::{
    AggregateRoot, CategoryId, DomainError, SearchInput, SearchOutput,
};
use crate::ports::{CategoryRepository, GenreRepository};

pub struct ListGenresHandler {
    genres: Arc<dyn GenreRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ListGenresHandler {
    pub fn new(genres: Arc<dyn GenreRepository>, categories: Arc<dyn CategoryRepository>) -> Self {
        Self { genres, categories }
    }

    /// Lists one page of genres. Category names for the whole page are
    /// resolved with a single batch lookup; deleted categories stay unnamed.
    pub async fn handle(
        &self,
        input: SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<GenreOutput>, DomainError> {
        let page = self.genres.search(&input, cancel).await?;

        let wanted: BTreeSet<CategoryId> = page
            .items
            .iter()
            .flat_map(|genre| genre.categories_id().iter().copied())
            .collect();
        let wanted: Vec<CategoryId> = wanted.into_iter().collect();

        let names: HashMap<CategoryId, String> = self
            .categories
            .get_list_by_ids(&wanted, cancel)
            .await?
            .into_iter()
            .map(|category| (category.id(), category.name().to_string()))
            .collect();

        Ok(page.map(|genre| GenreOutput::from(&genre).with_category_names(&names)))
    }
}
