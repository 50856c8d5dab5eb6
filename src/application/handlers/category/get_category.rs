//! GetCategoryHandler - Query handler for a single category.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CategoryOutput;
use crate::domain::foundation::{CategoryId, DomainError};
use crate::ports::CategoryRepository;

#[derive(Debug, Clone)]
pub struct GetCategoryQuery {
    pub id: CategoryId,
}

pub struct GetCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl GetCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetCategoryQuery,
        cancel: &CancellationToken,
    ) -> Result<CategoryOutput, DomainError> {
        let category = self.repository.get(query.id, cancel).await?;
        Ok(CategoryOutput::from(&category))
    }
}
