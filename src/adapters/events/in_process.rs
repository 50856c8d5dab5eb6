//! In-process event publisher with an explicit handler registry.
//!
//! Dispatch is keyed by [`EventKind`]. Handlers for one kind run one at a
//! time, in the order they were registered, and the first failure stops the
//! remaining handlers for that event.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::domain::foundation::{ensure_not_cancelled, DomainError};
use crate::domain::{CatalogEvent, EventKind};
use crate::ports::{EventHandler, EventPublisher};

/// Handlers per event kind. Built once at startup and handed to the publisher.
///
/// Registration order is invocation order.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `handler` to the handlers for `kind`.
    pub fn register(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> &mut Self {
        self.handlers.entry(kind).or_default().push(handler);
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> Self {
        self.register(kind, handler);
        self
    }

    pub fn handlers_for(&self, kind: EventKind) -> &[Arc<dyn EventHandler>] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of registrations across all kinds.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (kind, handlers) in &self.handlers {
            let names: Vec<_> = handlers.iter().map(|h| h.name()).collect();
            map.entry(kind, &names);
        }
        map.finish()
    }
}

/// Publishes by calling the registered handlers directly, in the caller's task.
#[derive(Debug, Clone)]
pub struct InProcessEventPublisher {
    registry: HandlerRegistry,
}

impl InProcessEventPublisher {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl EventPublisher for InProcessEventPublisher {
    async fn publish(
        &self,
        event: &CatalogEvent,
        cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        let kind = event.kind();
        let handlers = self.registry.handlers_for(kind);
        debug!(event = %kind, handlers = handlers.len(), "Publishing event");

        for handler in handlers {
            ensure_not_cancelled(cancel)?;
            if let Err(err) = handler.handle(event, cancel).await {
                warn!(
                    handler = handler.name(),
                    event = %kind,
                    error = %err,
                    "Event handler failed"
                );
                return Err(match err {
                    DomainError::UpstreamFailure { .. } | DomainError::Cancelled => err,
                    other => DomainError::upstream(handler.name(), other),
                });
            }
        }
        Ok(())
    }
}
