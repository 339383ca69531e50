//! SQLite backend for the tender record store.
//!
//! Wraps [`tokio_rusqlite`] so database access runs off the async runtime.
//! A connection is opened for each operation and dropped when it finishes.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
