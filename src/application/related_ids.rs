//! Referential-integrity guard for cross-aggregate id references.
//!
//! Checked before the mutation is applied and outside the persistence
//! transaction: a referenced aggregate deleted between the check and the
//! commit is not detected.

use std::collections::HashSet;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::{BatchRepository, DomainError};

/// Fails with `RelatedAggregateNotFound` unless every id in `ids` resolves.
///
/// Unresolved ids are reported in input order, each once. An empty `ids`
/// performs no lookup.
///
/// # Errors
///
/// - `RelatedAggregateNotFound` naming every missing id
/// - whatever the repository lookup fails with
pub async fn ensure_all_exist<T, ID, R>(
    repository: &R,
    aggregate: &'static str,
    ids: &[ID],
    cancel: &CancellationToken,
) -> Result<(), DomainError>
where
    R: BatchRepository<T, ID> + ?Sized,
    T: Send + Sync,
    ID: Copy + Eq + Hash + Display + Send + Sync + Debug + 'static,
{
    if ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<ID> = repository
        .get_ids_list_by_ids(ids, cancel)
        .await?
        .into_iter()
        .collect();

    let mut reported = HashSet::new();
    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !found.contains(id) && reported.insert(**id))
        .map(|id| id.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::RelatedAggregateNotFound {
            aggregate,
            ids: missing,
        })
    }
}
