//! Storage Adapters
//!
//! Implementations of the StorageService port for video media.
//!
//! ## Available Adapters
//!
//! - **LocalFileStorage** - Stores objects as files under a base directory
//! - **InMemoryStorage** - Stores objects in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryStorage, LocalFileStorage};
//!
//! // Production: file-based storage
//! let storage = LocalFileStorage::new("./data/media");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryStorage::new();
//! ```

mod in_memory_storage;
mod local_file_storage;

pub use in_memory_storage::InMemoryStorage;
pub use local_file_storage::LocalFileStorage;
