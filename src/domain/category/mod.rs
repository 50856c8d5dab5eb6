//! Category domain module.
//!
//! # Events
//!
//! - `CategoryCreated` - Raised when a new category is created
//! - `CategoryUpdated` - Raised when name, description or activation changes

mod aggregate;
mod events;

pub use aggregate::Category;
pub use events::{CategoryCreated, CategoryUpdated};
