//! Error type for `tenders-scrape`.
//!
//! Every variant aborts the pipeline run that produced it. Malformed table
//! rows are not errors; see [`crate::extract::SkipReason`].

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("request failed: {0}")]
  Fetch(#[from] reqwest::Error),

  #[error("unexpected response status {0}")]
  Status(StatusCode),

  #[error("no table found on page")]
  NoTable,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
