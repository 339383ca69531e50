//! Error types for `tenders-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown project status: {0:?}")]
  UnknownStatus(String),

  #[error("invalid check timestamp {value:?}: {source}")]
  InvalidTimestamp {
    value:  String,
    #[source]
    source: chrono::ParseError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
