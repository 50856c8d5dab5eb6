//! Application handlers.
//!
//! One handler per catalog operation. Each takes its ports as `Arc<dyn ...>`,
//! accepts a command or query plus a cancellation token, and returns an
//! output projection of the aggregate.

pub mod cast_member;
pub mod category;
pub mod genre;
mod related;
pub mod video;

pub use related::RelatedOutput;

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory wiring shared by the handler tests.

    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};
    use tokio_util::sync::CancellationToken;

    use crate::adapters::memory::{InMemoryCatalog, InMemorySession};
    use crate::application::CommitCoordinator;
    use crate::domain::foundation::DomainError;
    use crate::domain::{CatalogEvent, EventKind};
    use crate::ports::EventPublisher;

    #[derive(Default)]
    pub struct RecordingPublisher {
        events: Mutex<Vec<CatalogEvent>>,
    }

    impl RecordingPublisher {
        pub fn kinds(&self) -> Vec<EventKind> {
            self.events.lock().unwrap().iter().map(|e| e.kind()).collect()
        }

        pub fn events(&self) -> Vec<CatalogEvent> {
            self.events.lock().unwrap().clone()
        }

        pub fn clear(&self) {
            self.events.lock().unwrap().clear();
        }
    }

    #[async_trait]
    impl EventPublisher for RecordingPublisher {
        async fn publish(
            &self,
            event: &CatalogEvent,
            _cancel: &CancellationToken,
        ) -> Result<(), DomainError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    pub struct Harness {
        pub catalog: Arc<InMemoryCatalog>,
        pub session: Arc<InMemorySession>,
        pub publisher: Arc<RecordingPublisher>,
        pub unit_of_work: Arc<CommitCoordinator>,
    }

    impl Harness {
        pub fn new() -> Self {
            let catalog = InMemoryCatalog::new();
            let session = catalog.session();
            let publisher = Arc::new(RecordingPublisher::default());
            let unit_of_work = Arc::new(CommitCoordinator::new(
                session.clone(),
                publisher.clone(),
            ));
            Self {
                catalog,
                session,
                publisher,
                unit_of_work,
            }
        }
    }

    pub fn token() -> CancellationToken {
        CancellationToken::new()
    }
}
