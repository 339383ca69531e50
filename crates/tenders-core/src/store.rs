//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `tenders-store-sqlite`). The scrape
//! pipeline and the API depend on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::record::ProjectRecord;

/// A durable table of [`ProjectRecord`]s keyed by `id`.
///
/// Upserts never overwrite `title`, `department` or `publish_date` of an
/// existing record; only `status` and `last_checked` are refreshed. Records
/// are never deleted.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert `record`, or refresh the status and check time of the existing
  /// record with the same id. Commits or fails as a unit.
  fn upsert<'a>(
    &'a self,
    record: &'a ProjectRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Upsert every record in a single transaction, returning how many were
  /// written. Either all of them are committed or none are.
  fn upsert_batch<'a>(
    &'a self,
    records: &'a [ProjectRecord],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Look up a single record by id.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<ProjectRecord>, Self::Error>> + Send + 'a;

  /// Every stored record, most recently checked first.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<ProjectRecord>, Self::Error>> + Send + '_;
}
