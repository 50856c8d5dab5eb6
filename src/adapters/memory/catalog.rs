//! In-memory catalog store and its per-operation sessions.
//!
//! `InMemoryCatalog` holds the committed state of every aggregate table.
//! `InMemorySession` is one operation's staged change set; `persist` applies
//! it to the catalog while holding every table's write lock, so a commit is
//! all-or-nothing with respect to concurrent readers.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::cast_member::CastMember;
use crate::domain::category::Category;
use crate::domain::foundation::{
    AggregateRoot, CastMemberId, CategoryId, DomainError, GenreId, VideoId,
};
use crate::domain::genre::Genre;
use crate::domain::video::Video;
use crate::ports::{CatalogAggregate, PersistenceSession, StagedChange, StagedOperation};

use super::InMemoryRepository;

/// Committed state shared by every session.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    pub(super) categories: RwLock<BTreeMap<CategoryId, Category>>,
    pub(super) genres: RwLock<BTreeMap<GenreId, Genre>>,
    pub(super) cast_members: RwLock<BTreeMap<CastMemberId, CastMember>>,
    pub(super) videos: RwLock<BTreeMap<VideoId, Video>>,
}

impl InMemoryCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Opens a fresh session for one operation.
    pub fn session(self: &Arc<Self>) -> Arc<InMemorySession> {
        Arc::new(InMemorySession {
            catalog: Arc::clone(self),
            staged: Mutex::new(Vec::new()),
            last_persisted: Mutex::new(Vec::new()),
        })
    }

    pub async fn category_count(&self) -> usize {
        self.categories.read().await.len()
    }

    pub async fn genre_count(&self) -> usize {
        self.genres.read().await.len()
    }

    pub async fn cast_member_count(&self) -> usize {
        self.cast_members.read().await.len()
    }

    pub async fn video_count(&self) -> usize {
        self.videos.read().await.len()
    }

    async fn apply(&self, changes: &[StagedChange]) {
        // Fixed lock order across all writers.
        let mut categories = self.categories.write().await;
        let mut genres = self.genres.write().await;
        let mut cast_members = self.cast_members.write().await;
        let mut videos = self.videos.write().await;

        for change in changes {
            let mut aggregate = change.aggregate.clone();
            aggregate.clear_events();
            let delete = change.operation == StagedOperation::Delete;

            match aggregate {
                CatalogAggregate::Category(a) => write_row(&mut categories, a, delete),
                CatalogAggregate::Genre(a) => write_row(&mut genres, a, delete),
                CatalogAggregate::CastMember(a) => write_row(&mut cast_members, a, delete),
                CatalogAggregate::Video(a) => write_row(&mut videos, a, delete),
            }
        }
    }
}

fn write_row<T>(table: &mut BTreeMap<T::Id, T>, aggregate: T, delete: bool)
where
    T: AggregateRoot,
    T::Id: Ord,
{
    if delete {
        table.remove(&aggregate.id());
    } else {
        table.insert(aggregate.id(), aggregate);
    }
}

/// One operation's change set over an [`InMemoryCatalog`].
#[derive(Debug)]
pub struct InMemorySession {
    catalog: Arc<InMemoryCatalog>,
    staged: Mutex<Vec<StagedChange>>,
    last_persisted: Mutex<Vec<StagedChange>>,
}

impl InMemorySession {
    pub fn catalog(&self) -> &Arc<InMemoryCatalog> {
        &self.catalog
    }

    pub fn categories(self: &Arc<Self>) -> Arc<InMemoryRepository<Category>> {
        Arc::new(InMemoryRepository::new(Arc::clone(&self.catalog), self.clone()))
    }

    pub fn genres(self: &Arc<Self>) -> Arc<InMemoryRepository<Genre>> {
        Arc::new(InMemoryRepository::new(Arc::clone(&self.catalog), self.clone()))
    }

    pub fn cast_members(self: &Arc<Self>) -> Arc<InMemoryRepository<CastMember>> {
        Arc::new(InMemoryRepository::new(Arc::clone(&self.catalog), self.clone()))
    }

    pub fn videos(self: &Arc<Self>) -> Arc<InMemoryRepository<Video>> {
        Arc::new(InMemoryRepository::new(Arc::clone(&self.catalog), self.clone()))
    }

    /// The change set written by the most recent successful `persist`.
    pub async fn last_persisted(&self) -> Vec<StagedChange> {
        self.last_persisted.lock().await.clone()
    }

    pub async fn staged_count(&self) -> usize {
        self.staged.lock().await.len()
    }
}

#[async_trait]
impl PersistenceSession for InMemorySession {
    async fn stage(&self, change: StagedChange) {
        self.staged.lock().await.push(change);
    }

    async fn take_staged(&self) -> Vec<StagedChange> {
        std::mem::take(&mut *self.staged.lock().await)
    }

    async fn persist(&self, changes: Vec<StagedChange>) -> Result<(), DomainError> {
        self.catalog.apply(&changes).await;
        *self.last_persisted.lock().await = changes;
        Ok(())
    }
}
