//! DeleteCategoryHandler - Command handler for removing categories.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::{CategoryId, DomainError};
use crate::ports::{CategoryRepository, UnitOfWork};

#[derive(Debug, Clone)]
pub struct DeleteCategoryCommand {
    pub id: CategoryId,
}

pub struct DeleteCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl DeleteCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// Genres and videos that reference the category keep the dangling id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the category does not exist
    pub async fn handle(
        &self,
        cmd: DeleteCategoryCommand,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let category = self.repository.get(cmd.id, cancel).await?;
        self.repository.delete(category, cancel).await?;
        self.unit_of_work.commit(cancel).await
    }
}
