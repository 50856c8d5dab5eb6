//! EventPublisher port - Interface for publishing domain events.
//!
//! The unit of work calls the publisher once per drained event, awaiting each
//! call before the next. The publisher knows nothing about persistence.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::DomainError;
use crate::domain::CatalogEvent;

/// Port for publishing domain events.
///
/// Implementations must:
/// - invoke every handler registered for the event's kind, sequentially
/// - treat "no handler registered" as success
/// - stop at the first handler failure and return it as `UpstreamFailure`
///
/// # Example
///
/// ```ignore
/// for event in aggregate.pending_events() {
///     publisher.publish(event, &cancel).await?;
/// }
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Delivers one event to its handlers.
    ///
    /// # Errors
    ///
    /// - `UpstreamFailure` if a handler fails
    /// - `Cancelled` if `cancel` fired before a handler was invoked
    async fn publish(
        &self,
        event: &CatalogEvent,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError>;
}
