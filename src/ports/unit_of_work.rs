//! Unit of Work and persistence session ports.
//!
//! A `PersistenceSession` is the per-operation change set: repositories stage
//! inserts, updates and deletes into it, and `persist` writes them all in one
//! transaction. The `UnitOfWork` drives the commit protocol on top of it.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::cast_member::CastMember;
use crate::domain::category::Category;
use crate::domain::foundation::{AggregateRoot, DomainError};
use crate::domain::genre::Genre;
use crate::domain::video::Video;
use crate::domain::CatalogEvent;

/// Any catalog aggregate, as handed over to the session on staging.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAggregate {
    Category(Category),
    Genre(Genre),
    CastMember(CastMember),
    Video(Video),
}

impl CatalogAggregate {
    pub fn aggregate_type(&self) -> &'static str {
        match self {
            CatalogAggregate::Category(_) => "Category",
            CatalogAggregate::Genre(_) => "Genre",
            CatalogAggregate::CastMember(_) => "CastMember",
            CatalogAggregate::Video(_) => "Video",
        }
    }

    pub fn id_string(&self) -> String {
        match self {
            CatalogAggregate::Category(a) => a.id().to_string(),
            CatalogAggregate::Genre(a) => a.id().to_string(),
            CatalogAggregate::CastMember(a) => a.id().to_string(),
            CatalogAggregate::Video(a) => a.id().to_string(),
        }
    }

    pub fn pending_events(&self) -> &[CatalogEvent] {
        match self {
            CatalogAggregate::Category(a) => a.pending_events(),
            CatalogAggregate::Genre(a) => a.pending_events(),
            CatalogAggregate::CastMember(a) => a.pending_events(),
            CatalogAggregate::Video(a) => a.pending_events(),
        }
    }

    pub fn clear_events(&mut self) {
        match self {
            CatalogAggregate::Category(a) => a.clear_events(),
            CatalogAggregate::Genre(a) => a.clear_events(),
            CatalogAggregate::CastMember(a) => a.clear_events(),
            CatalogAggregate::Video(a) => a.clear_events(),
        }
    }
}

impl From<Category> for CatalogAggregate {
    fn from(aggregate: Category) -> Self {
        CatalogAggregate::Category(aggregate)
    }
}

impl From<Genre> for CatalogAggregate {
    fn from(aggregate: Genre) -> Self {
        CatalogAggregate::Genre(aggregate)
    }
}

impl From<CastMember> for CatalogAggregate {
    fn from(aggregate: CastMember) -> Self {
        CatalogAggregate::CastMember(aggregate)
    }
}

impl From<Video> for CatalogAggregate {
    fn from(aggregate: Video) -> Self {
        CatalogAggregate::Video(aggregate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagedOperation {
    Insert,
    Update,
    Delete,
}

/// One pending write, in the order it was staged.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedChange {
    pub operation: StagedOperation,
    pub aggregate: CatalogAggregate,
}

impl StagedChange {
    pub fn insert(aggregate: impl Into<CatalogAggregate>) -> Self {
        Self {
            operation: StagedOperation::Insert,
            aggregate: aggregate.into(),
        }
    }

    pub fn update(aggregate: impl Into<CatalogAggregate>) -> Self {
        Self {
            operation: StagedOperation::Update,
            aggregate: aggregate.into(),
        }
    }

    pub fn delete(aggregate: impl Into<CatalogAggregate>) -> Self {
        Self {
            operation: StagedOperation::Delete,
            aggregate: aggregate.into(),
        }
    }
}

/// Per-operation change set backed by a persistence engine.
///
/// Each use-case invocation gets its own session; sessions are never shared
/// between concurrent operations.
#[async_trait]
pub trait PersistenceSession: Send + Sync {
    /// Appends a change to the set.
    async fn stage(&self, change: StagedChange);

    /// Removes and returns every staged change, in staging order.
    async fn take_staged(&self) -> Vec<StagedChange>;

    /// Writes `changes` atomically. Either all apply or none do.
    ///
    /// # Errors
    ///
    /// - `UpstreamFailure` if the engine rejects the transaction
    async fn persist(&self, changes: Vec<StagedChange>) -> Result<(), DomainError>;
}

/// Commits everything staged during one operation.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Publishes pending events of the staged aggregates, then persists them.
    ///
    /// # Errors
    ///
    /// - `UpstreamFailure` if an event handler or the persistence engine fails
    /// - `Cancelled` if `cancel` fired before persistence began
    async fn commit(&self, cancel: &CancellationToken) -> Result<(), DomainError>;

    /// Placeholder; nothing is durable before `commit`.
    async fn rollback(&self, cancel: &CancellationToken) -> Result<(), DomainError>;
}
