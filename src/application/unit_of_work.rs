//! CommitCoordinator - The commit protocol every mutating operation ends with.
//!
//! Steps, in order:
//!
//! 1. Take the staged change set from the session
//! 2. Keep the aggregates whose event buffer is non-empty
//! 3. Publish their events one at a time, aggregate order then insertion order
//! 4. Clear each aggregate's buffer once its events are published
//! 5. Persist the whole change set in one transaction
//!
//! Events go out before the transaction. A handler may therefore observe an
//! event for a change that later fails to persist.

use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::foundation::{ensure_not_cancelled, DomainError};
use crate::ports::{EventPublisher, PersistenceSession, UnitOfWork};

/// Unit of work over one persistence session.
pub struct CommitCoordinator {
    session: Arc<dyn PersistenceSession>,
    publisher: Arc<dyn EventPublisher>,
}

impl CommitCoordinator {
    pub fn new(session: Arc<dyn PersistenceSession>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { session, publisher }
    }
}

#[async_trait]
impl UnitOfWork for CommitCoordinator {
    async fn commit(&self, cancel: &CancellationToken) -> Result<(), DomainError> {
        // Taken before any check so a failed commit never leaves changes behind.
        let mut changes = self.session.take_staged().await;
        ensure_not_cancelled(cancel)?;
        let with_events = changes
            .iter()
            .filter(|change| !change.aggregate.pending_events().is_empty())
            .count();

        debug!(
            staged = changes.len(),
            with_events, "Committing unit of work"
        );

        let mut published = 0usize;
        for change in changes
            .iter_mut()
            .filter(|change| !change.aggregate.pending_events().is_empty())
        {
            for event in change.aggregate.pending_events() {
                ensure_not_cancelled(cancel)?;
                if let Err(err) = self.publisher.publish(event, cancel).await {
                    warn!(
                        aggregate_type = change.aggregate.aggregate_type(),
                        aggregate_id = %change.aggregate.id_string(),
                        event = %event.kind(),
                        error = %err,
                        "Event publication failed, commit aborted"
                    );
                    return Err(err);
                }
                published += 1;
            }
            change.aggregate.clear_events();
        }

        ensure_not_cancelled(cancel)?;
        let staged = changes.len();
        self.session.persist(changes).await?;

        info!(staged, published, "Unit of work committed");
        Ok(())
    }

    async fn rollback(&self, _cancel: &CancellationToken) -> Result<(), DomainError> {
        Ok(())
    }
}
