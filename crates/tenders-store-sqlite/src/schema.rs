//! SQL schema for the tender store.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`, so it is
/// safe to run against a database that already holds records.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS projects (
    id           TEXT PRIMARY KEY,
    title        TEXT,
    department   TEXT,
    publish_date TEXT,             -- verbatim from the source page
    status       TEXT,             -- always 'Active'
    last_checked TEXT              -- 'YYYY-MM-DD HH:MM', local time
);

CREATE INDEX IF NOT EXISTS projects_last_checked_idx ON projects(last_checked);
";

/// Insert a record, or refresh only `status` and `last_checked` when the id
/// is already present.
pub const UPSERT: &str = "
INSERT INTO projects (id, title, department, publish_date, status, last_checked)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
ON CONFLICT(id) DO UPDATE SET
    status       = excluded.status,
    last_checked = excluded.last_checked
";

pub const SELECT_COLUMNS: &str =
  "SELECT id, title, department, publish_date, status, last_checked FROM projects";
