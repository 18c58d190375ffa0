//! Catalogue data management for the recommendation engine.
//!
//! This crate owns the write side of the event catalogue. [`mock`] generates
//! deterministic demo catalogues for seeding environments, and [`persist`]
//! writes catalogues and interaction logs to the SQLite database that
//! `eventide_core`'s store reads back.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod mock;
pub mod persist;

pub use persist::{
    PersistCatalogueError, RecordInteractionError, persist_catalogue, record_interaction,
};
