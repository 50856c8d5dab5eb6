//! Genre domain module.
//!
//! A genre groups videos and is itself tagged with a set of categories.
//! Category ids are references only; their existence is checked by the
//! application layer before a genre is staged.

mod aggregate;
mod events;

pub use aggregate::Genre;
pub use events::{GenreCreated, GenreUpdated};
