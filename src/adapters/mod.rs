//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event publisher and handlers
//! - `memory` - In-memory catalog used by tests and local runs
//! - `messaging` - Encoder queue producers (Redis, in-memory)
//! - `postgres` - PostgreSQL repositories and persistence session
//! - `storage` - Media object storage (local filesystem, in-memory)

pub mod events;
pub mod memory;
pub mod messaging;
pub mod postgres;
pub mod storage;

pub use events::{HandlerRegistry, InProcessEventPublisher, SendToEncoderHandler};
pub use memory::{InMemoryCatalog, InMemoryRepository, InMemorySession};
pub use messaging::{InMemoryMessageProducer, RedisMessageProducer};
pub use postgres::PostgresSession;
pub use storage::{InMemoryStorage, LocalFileStorage};
