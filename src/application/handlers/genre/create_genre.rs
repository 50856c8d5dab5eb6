//! CreateGenreHandler - Command handler for creating genres.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::GenreOutput;
use crate::application::ensure_all_exist;
use crate::domain::category::Category;
use crate::domain::foundation::{CategoryId, DomainError};
use crate::domain::genre::Genre;
use crate::ports::{CategoryRepository, GenreRepository, UnitOfWork};

/// Command to create a genre linked to existing categories.
#[derive(Debug, Clone)]
pub struct CreateGenreCommand {
    pub name: String,
    pub is_active: bool,
    pub categories_id: Vec<CategoryId>,
}

pub struct CreateGenreHandler {
    genres: Arc<dyn GenreRepository>,
    categories: Arc<dyn CategoryRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl CreateGenreHandler {
    pub fn new(
        genres: Arc<dyn GenreRepository>,
        categories: Arc<dyn CategoryRepository>,
        unit_of_work: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            genres,
            categories,
            unit_of_work,
        }
    }

    /// # Errors
    ///
    /// - `RelatedAggregateNotFound` if any category id does not resolve
    /// - `ValidationFailed` if the name is invalid
    pub async fn handle(
        &self,
        cmd: CreateGenreCommand,
        cancel: &CancellationToken,
    ) -> Result<GenreOutput, DomainError> {
        ensure_all_exist::<Category, _, _>(
            self.categories.as_ref(),
            "Category",
            &cmd.categories_id,
            cancel,
        )
        .await?;

        let genre = Genre::new(cmd.name, cmd.is_active, cmd.categories_id)?;
        let output = GenreOutput::from(&genre);

        self.genres.insert(genre, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{token, Harness};
    use crate::domain::foundation::{AggregateRoot, SearchableRepository};
    use crate::domain::EventKind;

    async fn seed_category(h: &Harness, name: &str) -> CategoryId {
        let category = Category::new(name, "", true).unwrap();
        let id = category.id();
        h.session.categories().insert(category, &token()).await.unwrap();
        h.unit_of_work.commit(&token()).await.unwrap();
        h.publisher.clear();
        id
    }

    #[tokio::test]
    async fn creates_genre_with_categories() {
        let h = Harness::new();
        let movies = seed_category(&h, "Movies").await;
        let series = seed_category(&h, "Series").await;
        let handler =
            CreateGenreHandler::new(h.session.genres(), h.session.categories(), h.unit_of_work.clone());

        let output = handler
            .handle(
                CreateGenreCommand {
                    name: "Drama".to_string(),
                    is_active: true,
                    categories_id: vec![series, movies],
                },
                &token(),
            )
            .await
            .unwrap();

        let stored = h.session.genres().get(output.id, &token()).await.unwrap();
        assert_eq!(GenreOutput::from(&stored), output);
        assert_eq!(stored.categories_id().len(), 2);
        assert_eq!(h.publisher.kinds(), vec![EventKind::GenreCreated]);
    }

    #[tokio::test]
    async fn rejects_unknown_categories_before_creating() {
        let h = Harness::new();
        let movies = seed_category(&h, "Movies").await;
        let ghost = CategoryId::new();
        let handler =
            CreateGenreHandler::new(h.session.genres(), h.session.categories(), h.unit_of_work.clone());

        let result = handler
            .handle(
                CreateGenreCommand {
                    name: "Drama".to_string(),
                    is_active: true,
                    categories_id: vec![movies, ghost],
                },
                &token(),
            )
            .await;

        match result {
            Err(DomainError::RelatedAggregateNotFound { aggregate, ids }) => {
                assert_eq!(aggregate, "Category");
                assert_eq!(ids, vec![ghost.to_string()]);
            }
            other => panic!("expected RelatedAggregateNotFound, got {:?}", other),
        }
        assert_eq!(h.catalog.genre_count().await, 0);
        assert_eq!(h.session.staged_count().await, 0);
    }

    #[tokio::test]
    async fn creates_genre_without_categories() {
        let h = Harness::new();
        let handler =
            CreateGenreHandler::new(h.session.genres(), h.session.categories(), h.unit_of_work.clone());

        let output = handler
            .handle(
                CreateGenreCommand {
                    name: "Comedy".to_string(),
                    is_active: false,
                    categories_id: Vec::new(),
                },
                &token(),
            )
            .await
            .unwrap();

        assert!(output.categories.is_empty());
        assert!(!output.is_active);
    }
}
