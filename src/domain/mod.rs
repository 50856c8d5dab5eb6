//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, errors, events, search)
//! - `category` - Category aggregate
//! - `genre` - Genre aggregate and its category references
//! - `cast_member` - Cast member aggregate
//! - `video` - Video aggregate, media slots and ratings
//! - `events` - The closed set of catalog events

pub mod cast_member;
pub mod category;
pub mod events;
pub mod foundation;
pub mod genre;
pub mod video;

pub use events::{CatalogEvent, EventKind};
