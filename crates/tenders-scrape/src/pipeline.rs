//! One fetch → extract → store cycle.

use std::sync::Arc;

use tenders_core::{CheckedAt, ProjectRecord, RecordStore};

use crate::{Error, Extraction, PageSource, Result, extract};

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
  /// Rows upserted into the store.
  pub processed:  usize,
  /// Table rows dropped as malformed.
  pub skipped:    usize,
  pub checked_at: CheckedAt,
}

/// Scrapes `source` and upserts what it finds into `store`.
///
/// Runs may overlap (the scheduler and a manual refresh share one pipeline).
/// Each run writes its rows in a single store transaction.
pub struct Pipeline<S, F> {
  store:  Arc<S>,
  source: F,
}

impl<S, F> Pipeline<S, F>
where
  S: RecordStore,
  F: PageSource,
{
  pub fn new(store: Arc<S>, source: F) -> Self { Self { store, source } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Run once, returning the number of records processed.
  ///
  /// Failures are logged and count as zero processed; the store is left as
  /// it was.
  pub async fn run(&self) -> usize {
    match self.try_run().await {
      Ok(report) => report.processed,
      Err(Error::NoTable) => {
        tracing::warn!("no table found on listing page; scan aborted");
        0
      }
      Err(e) => {
        tracing::error!(error = %e, "scan aborted");
        0
      }
    }
  }

  /// Run once, surfacing any failure to the caller.
  pub async fn try_run(&self) -> Result<RunReport> {
    tracing::info!("scanning listing page");

    let html = self.source.fetch().await?;
    let Extraction { rows, skipped } = extract(&html)?;

    let checked_at = CheckedAt::now();
    let records: Vec<ProjectRecord> =
      rows.into_iter().map(|row| row.into_record(checked_at)).collect();

    let processed = self
      .store
      .upsert_batch(&records)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    tracing::info!(processed, skipped, "scan complete");
    Ok(RunReport { processed, skipped, checked_at })
  }
}
