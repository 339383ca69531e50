//! Scrape-and-upsert pipeline for the tender listing.
//!
//! [`fetch`] retrieves the listing page, [`extract`] turns its first table
//! into rows, and [`pipeline`] writes those rows into a
//! [`RecordStore`](tenders_core::RecordStore). [`scheduler`] drives the
//! pipeline on a fixed period.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod scheduler;

pub use error::{Error, Result};
pub use extract::{Extraction, RawRow, RowOutcome, SkipReason, extract};
pub use fetch::{FetcherConfig, HttpFetcher, PageSource};
pub use pipeline::{Pipeline, RunReport};
pub use scheduler::Scheduler;
