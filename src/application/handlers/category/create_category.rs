//! CreateCategoryHandler - Command handler for creating categories.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CategoryOutput;
use crate::domain::category::Category;
use crate::domain::foundation::DomainError;
use crate::ports::{CategoryRepository, UnitOfWork};

/// Command to create a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

/// Handler for creating categories.
pub struct CreateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCategoryCommand,
        cancel: &CancellationToken,
    ) -> Result<CategoryOutput, DomainError> {
        let category = Category::new(cmd.name, cmd.description, cmd.is_active)?;
        let output = CategoryOutput::from(&category);

        self.repository.insert(category, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{token, Harness};
    use crate::domain::foundation::SearchableRepository;
    use crate::domain::EventKind;

    fn command(name: &str) -> CreateCategoryCommand {
        CreateCategoryCommand {
            name: name.to_string(),
            description: "Feature-length films".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn creates_and_persists_category() {
        let h = Harness::new();
        let handler = CreateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        let output = handler.handle(command("Movies"), &token()).await.unwrap();

        assert_eq!(output.name, "Movies");
        assert!(output.is_active);
        let stored = h.session.categories().get(output.id, &token()).await.unwrap();
        assert_eq!(CategoryOutput::from(&stored), output);
    }

    #[tokio::test]
    async fn publishes_category_created() {
        let h = Harness::new();
        let handler = CreateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        handler.handle(command("Movies"), &token()).await.unwrap();

        assert_eq!(h.publisher.kinds(), vec![EventKind::CategoryCreated]);
    }

    #[tokio::test]
    async fn rejects_short_name_without_persisting() {
        let h = Harness::new();
        let handler = CreateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        let result = handler.handle(command("TV"), &token()).await;

        assert!(matches!(result, Err(DomainError::ValidationFailed { .. })));
        assert_eq!(h.catalog.category_count().await, 0);
        assert!(h.publisher.kinds().is_empty());
    }
}
