//! Table extraction from the listing page.
//!
//! The first `<table>` in the document is taken to be the tender listing.
//! Row 0 is its header. Remaining rows map positionally:
//!
//! | Cell | Field |
//! |------|-------|
//! | 0 | `id` |
//! | 1 | `department` |
//! | 2 | `title` |
//! | 3 | `publish_date` |
//!
//! Rows that do not fit this shape are skipped, not reported as errors.

use std::{fmt, sync::LazyLock};

use scraper::{ElementRef, Html, Selector};
use tenders_core::{CheckedAt, ProjectRecord, ProjectStatus};

use crate::{Error, Result};

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

// Only ever called with the literal selectors above; `selectors_parse`
// covers them.
fn selector(css: &str) -> Selector {
  Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

/// Rows with fewer cells than this are decorative or malformed.
const MIN_CELLS: usize = 3;

// ─── Row types ───────────────────────────────────────────────────────────────

/// One data row, trimmed but otherwise as published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
  pub id:           String,
  pub department:   String,
  pub title:        String,
  pub publish_date: String,
}

impl RawRow {
  /// Stamp the row as observed at `checked_at`.
  pub fn into_record(self, checked_at: CheckedAt) -> ProjectRecord {
    ProjectRecord {
      id:           self.id,
      title:        self.title,
      department:   self.department,
      publish_date: self.publish_date,
      status:       ProjectStatus::Active,
      last_checked: checked_at,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// Fewer than three cells.
  TooFewCells { found: usize },
  /// Three cells: id, department and title are present but the date is not.
  MissingPublishDate,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::TooFewCells { found } => write!(f, "only {found} cells"),
      SkipReason::MissingPublishDate => f.write_str("no publish date cell"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
  Valid(RawRow),
  Skipped(SkipReason),
}

/// Decide whether a row's cell texts form a usable record.
pub fn classify_row(cells: &[String]) -> RowOutcome {
  match cells {
    [id, department, title, publish_date, ..] => RowOutcome::Valid(RawRow {
      id:           id.clone(),
      department:   department.clone(),
      title:        title.clone(),
      publish_date: publish_date.clone(),
    }),
    _ if cells.len() < MIN_CELLS => {
      RowOutcome::Skipped(SkipReason::TooFewCells { found: cells.len() })
    }
    _ => RowOutcome::Skipped(SkipReason::MissingPublishDate),
  }
}

// ─── Extraction ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
  pub rows:    Vec<RawRow>,
  pub skipped: usize,
}

/// Parse `html` and pull the data rows out of its first table.
///
/// Fails only when the document contains no table at all.
pub fn extract(html: &str) -> Result<Extraction> {
  let document = Html::parse_document(html);
  let table = document.select(&TABLE).next().ok_or(Error::NoTable)?;

  let mut extraction = Extraction::default();
  for (index, row) in table.select(&ROW).enumerate().skip(1) {
    let cells: Vec<String> = row.select(&CELL).map(cell_text).collect();
    match classify_row(&cells) {
      RowOutcome::Valid(raw) => extraction.rows.push(raw),
      RowOutcome::Skipped(reason) => {
        tracing::debug!(row = index, %reason, "skipping table row");
        extraction.skipped += 1;
      }
    }
  }

  Ok(extraction)
}

fn cell_text(cell: ElementRef<'_>) -> String {
  cell.text().collect::<String>().trim().to_owned()
}
