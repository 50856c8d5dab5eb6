//! ListCategoriesHandler - Paged, filtered category listing.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CategoryOutput;
use crate::domain::foundation::{DomainError, SearchInput, SearchOutput};
use crate::ports::CategoryRepository;

pub struct ListCategoriesHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl ListCategoriesHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        input: SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<CategoryOutput>, DomainError> {
        let page = self.repository.search(&input, cancel).await?;
        Ok(page.map(|category| CategoryOutput::from(&category)))
    }
}
