//! UpdateCategoryHandler - Command handler for partial category updates.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::CategoryOutput;
use crate::domain::foundation::{CategoryId, DomainError};
use crate::ports::{CategoryRepository, UnitOfWork};

/// Command to update a category. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryCommand {
    pub id: CategoryId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

pub struct UpdateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl UpdateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>, unit_of_work: Arc<dyn UnitOfWork>) -> Self {
        Self {
            repository,
            unit_of_work,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if the category does not exist
    /// - `ValidationFailed` if the new name or description is invalid
    pub async fn handle(
        &self,
        cmd: UpdateCategoryCommand,
        cancel: &CancellationToken,
    ) -> Result<CategoryOutput, DomainError> {
        let mut category = self.repository.get(cmd.id, cancel).await?;

        if cmd.name.is_some() || cmd.description.is_some() {
            let name = cmd.name.unwrap_or_else(|| category.name().to_string());
            category.update(name, cmd.description)?;
        }
        match cmd.is_active {
            Some(true) if !category.is_active() => category.activate(),
            Some(false) if category.is_active() => category.deactivate(),
            _ => {}
        }

        let output = CategoryOutput::from(&category);
        self.repository.update(category, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::category::{CreateCategoryCommand, CreateCategoryHandler};
    use crate::application::handlers::test_support::{token, Harness};
    use crate::domain::foundation::SearchableRepository;
    use crate::domain::EventKind;

    async fn seed(h: &Harness) -> CategoryOutput {
        let output = CreateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone())
            .handle(
                CreateCategoryCommand {
                    name: "Movies".to_string(),
                    description: "Feature films".to_string(),
                    is_active: true,
                },
                &token(),
            )
            .await
            .unwrap();
        h.publisher.clear();
        output
    }

    #[tokio::test]
    async fn updates_only_supplied_fields() {
        let h = Harness::new();
        let created = seed(&h).await;
        let handler = UpdateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        let output = handler
            .handle(
                UpdateCategoryCommand {
                    id: created.id,
                    name: Some("Films".to_string()),
                    ..Default::default()
                },
                &token(),
            )
            .await
            .unwrap();

        assert_eq!(output.name, "Films");
        assert_eq!(output.description, "Feature films");
        assert!(output.is_active);
        assert_eq!(output.created_at, created.created_at);
        assert_eq!(h.publisher.kinds(), vec![EventKind::CategoryUpdated]);
    }

    #[tokio::test]
    async fn deactivates_category() {
        let h = Harness::new();
        let created = seed(&h).await;
        let handler = UpdateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        handler
            .handle(
                UpdateCategoryCommand {
                    id: created.id,
                    is_active: Some(false),
                    ..Default::default()
                },
                &token(),
            )
            .await
            .unwrap();

        let stored = h.session.categories().get(created.id, &token()).await.unwrap();
        assert!(!stored.is_active());
        assert_eq!(stored.name(), "Movies");
    }

    #[tokio::test]
    async fn invalid_name_leaves_category_unchanged() {
        let h = Harness::new();
        let created = seed(&h).await;
        let handler = UpdateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        let result = handler
            .handle(
                UpdateCategoryCommand {
                    id: created.id,
                    name: Some(String::new()),
                    is_active: Some(false),
                    ..Default::default()
                },
                &token(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::ValidationFailed { .. })));
        let stored = h.session.categories().get(created.id, &token()).await.unwrap();
        assert_eq!(CategoryOutput::from(&stored), created);
        assert!(h.publisher.kinds().is_empty());
    }

    #[tokio::test]
    async fn fails_when_category_not_found() {
        let h = Harness::new();
        let handler = UpdateCategoryHandler::new(h.session.categories(), h.unit_of_work.clone());

        let result = handler
            .handle(
                UpdateCategoryCommand {
                    id: CategoryId::new(),
                    name: Some("Films".to_string()),
                    ..Default::default()
                },
                &token(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }
}
