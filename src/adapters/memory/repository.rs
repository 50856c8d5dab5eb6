//! Generic in-memory repository over one [`InMemoryCatalog`] table.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::domain::cast_member::CastMember;
use crate::domain::category::Category;
use crate::domain::foundation::{
    ensure_not_cancelled, search_in_memory, AggregateRoot, BatchRepository, DomainError,
    SearchInput, SearchOutput, Searchable, SearchableRepository,
};
use crate::domain::genre::Genre;
use crate::domain::video::Video;
use crate::ports::{
    CastMemberRepository, CatalogAggregate, CategoryRepository, GenreRepository,
    PersistenceSession, StagedChange, VideoRepository,
};

use super::InMemoryCatalog;

/// An aggregate that has a table in [`InMemoryCatalog`].
pub trait CatalogTable:
    AggregateRoot + Searchable + Clone + Send + Sync + Into<CatalogAggregate> + 'static
{
    const AGGREGATE: &'static str;

    fn table(catalog: &InMemoryCatalog) -> &RwLock<BTreeMap<Self::Id, Self>>;
}

impl CatalogTable for Category {
    const AGGREGATE: &'static str = "Category";

    fn table(catalog: &InMemoryCatalog) -> &RwLock<BTreeMap<Self::Id, Self>> {
        &catalog.categories
    }
}

impl CatalogTable for Genre {
    const AGGREGATE: &'static str = "Genre";

    fn table(catalog: &InMemoryCatalog) -> &RwLock<BTreeMap<Self::Id, Self>> {
        &catalog.genres
    }
}

impl CatalogTable for CastMember {
    const AGGREGATE: &'static str = "CastMember";

    fn table(catalog: &InMemoryCatalog) -> &RwLock<BTreeMap<Self::Id, Self>> {
        &catalog.cast_members
    }
}

impl CatalogTable for Video {
    const AGGREGATE: &'static str = "Video";

    fn table(catalog: &InMemoryCatalog) -> &RwLock<BTreeMap<Self::Id, Self>> {
        &catalog.videos
    }
}

/// Reads committed rows from the catalog and stages writes into a session.
pub struct InMemoryRepository<T> {
    catalog: Arc<InMemoryCatalog>,
    session: Arc<dyn PersistenceSession>,
    _aggregate: PhantomData<fn() -> T>,
}

impl<T> InMemoryRepository<T> {
    pub fn new(catalog: Arc<InMemoryCatalog>, session: Arc<dyn PersistenceSession>) -> Self {
        Self {
            catalog,
            session,
            _aggregate: PhantomData,
        }
    }
}

#[async_trait]
impl<T> SearchableRepository<T, T::Id> for InMemoryRepository<T>
where
    T: CatalogTable,
    T::Id: Ord + Send + Sync + Debug + 'static,
{
    async fn get(&self, id: T::Id, cancel: &CancellationToken) -> Result<T, DomainError> {
        ensure_not_cancelled(cancel)?;
        T::table(&self.catalog)
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(T::AGGREGATE, id))
    }

    async fn insert(&self, aggregate: T, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::insert(aggregate)).await;
        Ok(())
    }

    async fn update(&self, aggregate: T, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::update(aggregate)).await;
        Ok(())
    }

    async fn delete(&self, aggregate: T, cancel: &CancellationToken) -> Result<(), DomainError> {
        ensure_not_cancelled(cancel)?;
        self.session.stage(StagedChange::delete(aggregate)).await;
        Ok(())
    }

    async fn search(
        &self,
        input: &SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<T>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let rows: Vec<T> = T::table(&self.catalog).read().await.values().cloned().collect();
        Ok(search_in_memory(rows, input))
    }
}

#[async_trait]
impl<T> BatchRepository<T, T::Id> for InMemoryRepository<T>
where
    T: CatalogTable,
    T::Id: Ord + Send + Sync + Debug + 'static,
{
    async fn get_list_by_ids(
        &self,
        ids: &[T::Id],
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let table = T::table(&self.catalog).read().await;
        Ok(ids.iter().filter_map(|id| table.get(id).cloned()).collect())
    }

    async fn get_ids_list_by_ids(
        &self,
        ids: &[T::Id],
        cancel: &CancellationToken,
    ) -> Result<Vec<T::Id>, DomainError> {
        ensure_not_cancelled(cancel)?;
        let table = T::table(&self.catalog).read().await;
        Ok(ids.iter().copied().filter(|id| table.contains_key(id)).collect())
    }
}

impl CategoryRepository for InMemoryRepository<Category> {}

impl GenreRepository for InMemoryRepository<Genre> {}

impl CastMemberRepository for InMemoryRepository<CastMember> {}

impl VideoRepository for InMemoryRepository<Video> {}
