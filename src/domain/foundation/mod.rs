//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, errors, the event buffer, the aggregate
//! root capability and the search contract that form the vocabulary of the
//! catalog domain.

mod aggregate;
mod errors;
mod events;
mod ids;
mod repository;
mod search;
mod timestamp;

pub use aggregate::AggregateRoot;
pub use errors::{DomainError, ErrorCode, Notification, ValidationError};
pub(crate) use events::domain_event;
pub use events::{DomainEvent, EventBuffer, EventId};
pub use ids::{CastMemberId, CategoryId, GenreId, VideoId};
pub use repository::{ensure_not_cancelled, BatchRepository, SearchableRepository};
pub use search::{
    search_in_memory, SearchInput, SearchOrder, SearchOutput, Searchable, SortField, SortSpec,
};
pub use timestamp::Timestamp;
