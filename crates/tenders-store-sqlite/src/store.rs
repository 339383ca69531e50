//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use rusqlite::OptionalExtension as _;
use tenders_core::{ProjectRecord, RecordStore};

use crate::{
  Result,
  encode::{RawRecord, UpsertParams, upsert_params},
  schema::{SCHEMA, SELECT_COLUMNS, UPSERT},
};

/// How long a connection waits on a lock held by a concurrent pipeline run.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// ─── Store ───────────────────────────────────────────────────────────────────

/// A tender record store backed by a single SQLite file.
///
/// Holds only the file path. Every operation opens its own connection and
/// releases it when done, so no connection outlives a single call. Cloning is
/// cheap.
#[derive(Debug, Clone)]
pub struct SqliteStore {
  path: Arc<PathBuf>,
}

impl SqliteStore {
  /// A store at `path`, without touching the filesystem yet.
  pub fn at(path: impl AsRef<Path>) -> Self {
    Self { path: Arc::new(path.as_ref().to_path_buf()) }
  }

  /// Open (or create) a store at `path` and initialise the schema.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let store = Self::at(path);
    store.init_schema().await?;
    Ok(store)
  }

  /// Create the `projects` table if it is absent.
  ///
  /// Safe to call repeatedly and against a database that already holds
  /// records: nothing existing is dropped or rewritten.
  pub async fn init_schema(&self) -> Result<()> {
    self
      .with_conn(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::info!(path = %self.path.display(), "record store initialised");
    Ok(())
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Run `f` on a freshly opened connection. The connection is dropped,
  /// closing it, once `f` has returned.
  async fn with_conn<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R>
      + Send
      + 'static,
    R: Send + 'static,
  {
    let conn = tokio_rusqlite::Connection::open(self.path.as_path()).await?;
    let out = conn
      .call(move |conn| {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        f(conn)
      })
      .await?;
    Ok(out)
  }
}

fn execute_upsert(
  conn: &rusqlite::Connection,
  p: &UpsertParams,
) -> rusqlite::Result<usize> {
  conn
    .prepare_cached(UPSERT)?
    .execute(rusqlite::params![p.0, p.1, p.2, p.3, p.4, p.5])
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  async fn upsert(&self, record: &ProjectRecord) -> Result<()> {
    let params = upsert_params(record);

    self
      .with_conn(move |conn| {
        execute_upsert(conn, &params)?;
        Ok(())
      })
      .await
  }

  async fn upsert_batch(&self, records: &[ProjectRecord]) -> Result<usize> {
    let params: Vec<UpsertParams> = records.iter().map(upsert_params).collect();

    self
      .with_conn(move |conn| {
        // Dropping the transaction on an early return rolls it back.
        let tx = conn.transaction()?;
        let mut written = 0;
        for p in &params {
          execute_upsert(&tx, p)?;
          written += 1;
        }
        tx.commit()?;
        Ok(written)
      })
      .await
  }

  async fn get(&self, id: &str) -> Result<Option<ProjectRecord>> {
    let id = id.to_owned();

    let raw: Option<RawRecord> = self
      .with_conn(move |conn| {
        Ok(conn
          .query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            rusqlite::params![id],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn list_all(&self) -> Result<Vec<ProjectRecord>> {
    let raws: Vec<RawRecord> = self
      .with_conn(|conn| {
        let mut stmt =
          conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY last_checked DESC"))?;
        let rows = stmt
          .query_map([], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}
