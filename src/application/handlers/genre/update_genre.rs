//! UpdateGenreHandler - Command handler for genre updates.
//!
//! A supplied category list replaces the current set wholesale, and only
//! after every id in it has been resolved.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::GenreOutput;
use crate::application::ensure_all_exist;
use crate::domain::category::Category;
use crate::domain::foundation::{CategoryId, DomainError, GenreId};
use crate::ports::{CategoryRepository, GenreRepository, UnitOfWork};

/// Command to update a genre. `None` keeps the current value.
#[derive(Debug, Clone)]
pub struct UpdateGenreCommand {
    pub id: GenreId,
    pub name: String,
    pub is_active: Option<bool>,
    pub categories_id: Option<Vec<CategoryId>>,
}

pub struct UpdateGenreHandler {
    genres: Arc<dyn GenreRepository>,
    categories: Arc<dyn CategoryRepository>,
    unit_of_work: Arc<dyn UnitOfWork>,
}

impl UpdateGenreHandler {
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
    /// - `NotFound` if the genre does not exist
    /// - `RelatedAggregateNotFound` if a supplied category id does not resolve;
    ///   the genre is left untouched
    /// - `ValidationFailed` if the new name is invalid
    pub async fn handle(
        &self,
        cmd: UpdateGenreCommand,
        cancel: &CancellationToken,
    ) -> Result<GenreOutput, DomainError> {
        let mut genre = self.genres.get(cmd.id, cancel).await?;

        if let Some(categories_id) = &cmd.categories_id {
            ensure_all_exist::<Category, _, _>(
                self.categories.as_ref(),
                "Category",
                categories_id,
                cancel,
            )
            .await?;
        }

        genre.update(cmd.name)?;
        match cmd.is_active {
            Some(true) if !genre.is_active() => genre.activate(),
            Some(false) if genre.is_active() => genre.deactivate(),
            _ => {}
        }
        if let Some(categories_id) = cmd.categories_id {
            genre.sync_categories(categories_id);
        }

        let output = GenreOutput::from(&genre);
        self.genres.update(genre, cancel).await?;
        self.unit_of_work.commit(cancel).await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{token, Harness};
    use crate::domain::foundation::{AggregateRoot, SearchableRepository};
    use crate::domain::genre::Genre;
    use std::collections::BTreeSet;

    struct Seeded {
        genre: GenreId,
        movies: CategoryId,
        series: CategoryId,
        shorts: CategoryId,
    }

    async fn seed(h: &Harness) -> Seeded {
        let mut ids = Vec::new();
        for name in ["Movies", "Series", "Shorts"] {
            let category = Category::new(name, "", true).unwrap();
            ids.push(category.id());
            h.session.categories().insert(category, &token()).await.unwrap();
        }
        let genre = Genre::new("Drama", true, [ids[0], ids[1]]).unwrap();
        let genre_id = genre.id();
        h.session.genres().insert(genre, &token()).await.unwrap();
        h.unit_of_work.commit(&token()).await.unwrap();
        h.publisher.clear();

        Seeded {
            genre: genre_id,
            movies: ids[0],
            series: ids[1],
            shorts: ids[2],
        }
    }

    fn handler(h: &Harness) -> UpdateGenreHandler {
        UpdateGenreHandler::new(h.session.genres(), h.session.categories(), h.unit_of_work.clone())
    }

    #[tokio::test]
    async fn replaces_whole_category_set() {
        let h = Harness::new();
        let s = seed(&h).await;

        let output = handler(&h)
            .handle(
                UpdateGenreCommand {
                    id: s.genre,
                    name: "Drama".to_string(),
                    is_active: None,
                    categories_id: Some(vec![s.shorts]),
                },
                &token(),
            )
            .await
            .unwrap();

        assert_eq!(output.category_ids(), vec![s.shorts]);
        let stored = h.session.genres().get(s.genre, &token()).await.unwrap();
        assert_eq!(stored.categories_id(), &BTreeSet::from([s.shorts]));
    }

    #[tokio::test]
    async fn keeps_categories_when_none_supplied() {
        let h = Harness::new();
        let s = seed(&h).await;

        handler(&h)
            .handle(
                UpdateGenreCommand {
                    id: s.genre,
                    name: "Thriller".to_string(),
                    is_active: Some(false),
                    categories_id: None,
                },
                &token(),
            )
            .await
            .unwrap();

        let stored = h.session.genres().get(s.genre, &token()).await.unwrap();
        assert_eq!(stored.name(), "Thriller");
        assert!(!stored.is_active());
        assert_eq!(stored.categories_id(), &BTreeSet::from([s.movies, s.series]));
    }

    #[tokio::test]
    async fn unknown_category_leaves_stored_set_unchanged() {
        let h = Harness::new();
        let s = seed(&h).await;
        let ghost = CategoryId::new();

        let result = handler(&h)
            .handle(
                UpdateGenreCommand {
                    id: s.genre,
                    name: "Renamed".to_string(),
                    is_active: None,
                    categories_id: Some(vec![s.shorts, ghost]),
                },
                &token(),
            )
            .await;

        match result {
            Err(DomainError::RelatedAggregateNotFound { ids, .. }) => {
                assert_eq!(ids, vec![ghost.to_string()])
            }
            other => panic!("expected RelatedAggregateNotFound, got {:?}", other),
        }
        let stored = h.session.genres().get(s.genre, &token()).await.unwrap();
        assert_eq!(stored.name(), "Drama");
        assert_eq!(stored.categories_id(), &BTreeSet::from([s.movies, s.series]));
        assert!(h.publisher.kinds().is_empty());
    }
}
