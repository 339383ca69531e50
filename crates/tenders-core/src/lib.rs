//! Core types and trait definitions for the tender tracker.
//!
//! This crate is free of HTTP and database dependencies. The store, scrape,
//! and API crates all depend on it.

pub mod error;
pub mod record;
pub mod store;

pub use error::{Error, Result};
pub use record::{CheckedAt, ProjectRecord, ProjectStatus};
pub use store::RecordStore;
