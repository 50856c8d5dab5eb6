//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Delivers a catalog event to its handlers
//! - `EventHandler` - Reacts to one kind of catalog event
//!
//! ## Persistence Ports
//!
//! - `CategoryRepository`, `GenreRepository`, `CastMemberRepository`,
//!   `VideoRepository` - Searchable, batch-capable aggregate stores
//! - `PersistenceSession` - Per-operation staged change set
//! - `UnitOfWork` - Commit protocol entry point
//!
//! ## External Collaborators
//!
//! - `StorageService` - Binary media storage
//! - `MessageProducer` - Outbound messages (encoder requests)

mod event_handler;
mod event_publisher;
mod message_producer;
mod repositories;
mod storage_service;
mod unit_of_work;

pub use event_handler::EventHandler;
pub use event_publisher::EventPublisher;
pub use message_producer::{MessageProducer, MessagingError};
pub use repositories::{
    CastMemberRepository, CategoryRepository, GenreRepository, VideoRepository,
};
pub use storage_service::{ByteStream, StorageError, StorageService};
pub use unit_of_work::{
    CatalogAggregate, PersistenceSession, StagedChange, StagedOperation, UnitOfWork,
};
