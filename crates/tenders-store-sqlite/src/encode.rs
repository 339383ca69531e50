//! Conversion between [`ProjectRecord`] and the plain-text columns of the
//! `projects` table.

use tenders_core::{CheckedAt, ProjectRecord};

use crate::Result;

/// Column values exactly as SQLite returns them, before validation.
pub struct RawRecord {
  pub id:           String,
  pub title:        String,
  pub department:   String,
  pub publish_date: String,
  pub status:       String,
  pub last_checked: String,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      title:        row.get(1)?,
      department:   row.get(2)?,
      publish_date: row.get(3)?,
      status:       row.get(4)?,
      last_checked: row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<ProjectRecord> {
    Ok(ProjectRecord {
      id:           self.id,
      title:        self.title,
      department:   self.department,
      publish_date: self.publish_date,
      status:       self.status.parse()?,
      last_checked: self.last_checked.parse::<CheckedAt>()?,
    })
  }
}

/// Owned parameter tuple for [`crate::schema::UPSERT`], movable into the
/// connection thread.
pub type UpsertParams = (String, String, String, String, &'static str, String);

pub fn upsert_params(record: &ProjectRecord) -> UpsertParams {
  (
    record.id.clone(),
    record.title.clone(),
    record.department.clone(),
    record.publish_date.clone(),
    record.status.as_str(),
    record.last_checked.to_string(),
  )
}
