//! In-memory persistence adapters.
//!
//! Used by tests and local runs without a database. Semantics match the
//! Postgres adapter: writes are staged per session and become visible only
//! when the session persists.

mod catalog;
mod repository;

pub use catalog::{InMemoryCatalog, InMemorySession};
pub use repository::{CatalogTable, InMemoryRepository};
