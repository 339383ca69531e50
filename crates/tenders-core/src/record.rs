//! Project records: one row of the source tender listing, as stored.
//!
//! `title`, `department` and `publish_date` are fixed when a record is first
//! seen. Later scrapes that observe the same `id` only refresh `status` and
//! `last_checked`.

use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of a tender.
///
/// Every observed record is `Active`; nothing ever moves a record out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ProjectStatus {
  #[default]
  Active,
}

impl ProjectStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      ProjectStatus::Active => "Active",
    }
  }
}

impl fmt::Display for ProjectStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ProjectStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "Active" => Ok(ProjectStatus::Active),
      other => Err(Error::UnknownStatus(other.to_owned())),
    }
  }
}

// ─── Check timestamp ─────────────────────────────────────────────────────────

/// The local wall-clock minute at which a scrape observed a record.
///
/// Rendered as `YYYY-MM-DD HH:MM`, which sorts lexicographically in
/// chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "String")]
pub struct CheckedAt(NaiveDateTime);

impl CheckedAt {
  pub const FORMAT: &'static str = "%Y-%m-%d %H:%M";

  /// The current local time, truncated to the minute.
  pub fn now() -> Self { Self::from_naive(Local::now().naive_local()) }

  /// Truncate `dt` to minute precision.
  pub fn from_naive(dt: NaiveDateTime) -> Self {
    let truncated = dt
      .with_second(0)
      .and_then(|d| d.with_nanosecond(0))
      .unwrap_or(dt);
    Self(truncated)
  }
}

impl fmt::Display for CheckedAt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.format(Self::FORMAT))
  }
}

impl FromStr for CheckedAt {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    NaiveDateTime::parse_from_str(s, Self::FORMAT)
      .map(Self)
      .map_err(|source| Error::InvalidTimestamp { value: s.to_owned(), source })
  }
}

impl From<CheckedAt> for String {
  fn from(value: CheckedAt) -> Self { value.to_string() }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One tender/project entry, keyed by `id`.
///
/// `publish_date` is kept verbatim as published: the source mixes single
/// dates and date ranges in assorted formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
  pub id:           String,
  pub title:        String,
  pub department:   String,
  pub publish_date: String,
  pub status:       ProjectStatus,
  pub last_checked: CheckedAt,
}
