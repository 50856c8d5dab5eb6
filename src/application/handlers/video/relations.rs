//! Lookups a video makes against the aggregates it references.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::application::ensure_all_exist;
use crate::domain::cast_member::CastMember;
use crate::domain::category::Category;
use crate::domain::foundation::{
    AggregateRoot, CastMemberId, CategoryId, DomainError, GenreId,
};
use crate::domain::genre::Genre;
use crate::ports::{CastMemberRepository, CategoryRepository, GenreRepository};

/// Category and genre names keyed by id.
#[derive(Debug, Default)]
pub struct RelatedNames {
    pub categories: HashMap<CategoryId, String>,
    pub genres: HashMap<GenreId, String>,
}

#[derive(Clone)]
pub struct VideoRelations {
    categories: Arc<dyn CategoryRepository>,
    genres: Arc<dyn GenreRepository>,
    cast_members: Arc<dyn CastMemberRepository>,
}

impl VideoRelations {
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        genres: Arc<dyn GenreRepository>,
        cast_members: Arc<dyn CastMemberRepository>,
    ) -> Self {
        Self {
            categories,
            genres,
            cast_members,
        }
    }

    /// Checks every supplied id, one relation at a time, stopping at the
    /// first relation with unresolved ids.
    ///
    /// # Errors
    ///
    /// - `RelatedAggregateNotFound` naming the missing ids of that relation
    pub async fn ensure(
        &self,
        categories: &[CategoryId],
        genres: &[GenreId],
        cast_members: &[CastMemberId],
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        ensure_all_exist::<Category, _, _>(self.categories.as_ref(), "Category", categories, cancel)
            .await?;
        ensure_all_exist::<Genre, _, _>(self.genres.as_ref(), "Genre", genres, cancel).await?;
        ensure_all_exist::<CastMember, _, _>(
            self.cast_members.as_ref(),
            "CastMember",
            cast_members,
            cancel,
        )
        .await
    }

    /// Names for the given ids, one batch lookup per relation.
    pub async fn names(
        &self,
        categories: BTreeSet<CategoryId>,
        genres: BTreeSet<GenreId>,
        cancel: &CancellationToken,
    ) -> Result<RelatedNames, DomainError> {
        let categories: Vec<CategoryId> = categories.into_iter().collect();
        let genres: Vec<GenreId> = genres.into_iter().collect();

        Ok(RelatedNames {
            categories: self
                .categories
                .get_list_by_ids(&categories, cancel)
                .await?
                .into_iter()
                .map(|c| (c.id(), c.name().to_string()))
                .collect(),
            genres: self
                .genres
                .get_list_by_ids(&genres, cancel)
                .await?
                .into_iter()
                .map(|g| (g.id(), g.name().to_string()))
                .collect(),
        })
    }
}
