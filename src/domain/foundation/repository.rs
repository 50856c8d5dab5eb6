//! Base repository traits for the catalog aggregates.
//!
//! Every aggregate repository honors the same contract:
//!
//! - `get` loads one aggregate or fails with `NotFound`
//! - `insert` / `update` / `delete` only *stage* a change. Nothing is durable
//!   until the unit of work commits, and staging hands the aggregate (with its
//!   pending events) over to the unit of work.
//! - `search` answers a [`SearchInput`] per the shared search contract
//!
//! # Example
//!
//! ```ignore
//! #[async_trait]
//! pub trait CategoryRepository: BatchRepository<Category, CategoryId> {}
//!
//! pub struct CreateCategoryHandler {
//!     repository: Arc<dyn CategoryRepository>,
//!     unit_of_work: Arc<dyn UnitOfWork>,
//! }
//! ```

use async_trait::async_trait;
use std::fmt::Debug;
use tokio_util::sync::CancellationToken;

use super::{DomainError, SearchInput, SearchOutput};

/// Base trait for aggregate repositories.
///
/// # Type Parameters
///
/// - `T`: The aggregate root type being persisted
/// - `ID`: The identifier type for the aggregate (e.g., `CategoryId`)
#[async_trait]
pub trait SearchableRepository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Loads an aggregate by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no aggregate has this id
    async fn get(&self, id: ID, cancel: &CancellationToken) -> Result<T, DomainError>;

    /// Stages a new aggregate for insertion.
    async fn insert(&self, aggregate: T, cancel: &CancellationToken) -> Result<(), DomainError>;

    /// Stages an update of an existing aggregate.
    async fn update(&self, aggregate: T, cancel: &CancellationToken) -> Result<(), DomainError>;

    /// Stages the removal of an aggregate.
    async fn delete(&self, aggregate: T, cancel: &CancellationToken) -> Result<(), DomainError>;

    /// Runs a paginated, filtered, sorted query over committed state.
    async fn search(
        &self,
        input: &SearchInput,
        cancel: &CancellationToken,
    ) -> Result<SearchOutput<T>, DomainError>;
}

/// Batch lookups used by the referential-integrity guard and by
/// cross-aggregate name enrichment.
#[async_trait]
pub trait BatchRepository<T, ID>: SearchableRepository<T, ID>
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Returns the aggregates that exist among `ids`. Missing ids are skipped.
    async fn get_list_by_ids(
        &self,
        ids: &[ID],
        cancel: &CancellationToken,
    ) -> Result<Vec<T>, DomainError>;

    /// Returns the subset of `ids` that exist.
    async fn get_ids_list_by_ids(
        &self,
        ids: &[ID],
        cancel: &CancellationToken,
    ) -> Result<Vec<ID>, DomainError>;
}

/// Fails with `Cancelled` once the token has fired.
pub fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), DomainError> {
    if cancel.is_cancelled() {
        Err(DomainError::Cancelled)
    } else {
        Ok(())
    }
}
