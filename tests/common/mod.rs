//! In-memory wiring shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use media_catalog::adapters::{InMemoryCatalog, InMemorySession};
use media_catalog::application::CommitCoordinator;
use media_catalog::domain::foundation::DomainError;
use media_catalog::domain::{CatalogEvent, EventKind};
use media_catalog::ports::EventPublisher;

/// Publisher that remembers everything it was handed.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<CatalogEvent>>,
    calls: Mutex<usize>,
}

impl RecordingPublisher {
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.lock().unwrap().iter().map(|e| e.kind()).collect()
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
        *self.calls.lock().unwrap() = 0;
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(
        &self,
        event: &CatalogEvent,
        _cancel: &CancellationToken,
    ) -> Result<(), DomainError> {
        *self.calls.lock().unwrap() += 1;
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

pub struct Wiring {
    pub catalog: Arc<InMemoryCatalog>,
    pub session: Arc<InMemorySession>,
    pub publisher: Arc<RecordingPublisher>,
    pub unit_of_work: Arc<CommitCoordinator>,
}

impl Wiring {
    pub fn new() -> Self {
        let catalog = InMemoryCatalog::new();
        let session = catalog.session();
        let publisher = Arc::new(RecordingPublisher::default());
        let unit_of_work = Arc::new(CommitCoordinator::new(session.clone(), publisher.clone()));
        Self {
            catalog,
            session,
            publisher,
            unit_of_work,
        }
    }

    /// A fresh session over the same catalog, as a second request would get.
    pub fn next_request(&self) -> Self {
        let session = self.catalog.session();
        let publisher = Arc::new(RecordingPublisher::default());
        let unit_of_work = Arc::new(CommitCoordinator::new(session.clone(), publisher.clone()));
        Self {
            catalog: self.catalog.clone(),
            session,
            publisher,
            unit_of_work,
        }
    }
}

pub fn token() -> CancellationToken {
    CancellationToken::new()
}
