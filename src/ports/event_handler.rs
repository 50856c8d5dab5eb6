//! EventHandler port - Reaction to one kind of catalog event.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::domain::foundation::DomainError;
use crate::domain::CatalogEvent;

/// Handler for processing domain events.
///
/// Handlers run inside the commit, before persistence. A failure aborts the
/// commit, so handlers should be quick and side effects should be retryable.
///
/// # Example
///
/// ```ignore
/// struct AuditTrail { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for AuditTrail {
///     async fn handle(&self, event: &CatalogEvent, _cancel: &CancellationToken) -> Result<(), DomainError> {
///         // record the event...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "AuditTrail"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(
        &self,
        event: &CatalogEvent,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError>;

    /// Handler name for logging and error messages.
    fn name(&self) -> &'static str;
}
