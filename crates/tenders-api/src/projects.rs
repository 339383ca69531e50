//! Handlers for `/projects`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/projects` | All records, most recently checked first |

use std::sync::Arc;

use axum::{Json, extract::State};
use tenders_core::{ProjectRecord, RecordStore};

use crate::error::ApiError;

/// `GET /projects`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ProjectRecord>>, ApiError>
where
  S: RecordStore,
{
  let records = store
    .list_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(records))
}
