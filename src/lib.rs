//! Media Catalog - Catalog administration backend for a media library
//!
//! This crate manages categories, genres, cast members and videos. Changes
//! are staged on a persistence session and committed through a unit of work
//! that publishes the aggregates' domain events before persisting them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod state;
pub mod telemetry;
