//! HTTP front end for the tender tracker.
//!
//! Serves the landing page, the JSON API from [`tenders_api`], and a manual
//! refresh endpoint that runs the scrape pipeline inline.

pub mod settings;

pub use settings::ServerConfig;

use std::{path::Path, sync::Arc};

use axum::{Router, extract::State, routing::get};
use tenders_core::RecordStore;
use tenders_scrape::{PageSource, Pipeline};
use tower_http::{cors::CorsLayer, services::ServeFile, trace::TraceLayer};

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
///
/// | Method | Path | Notes |
/// |--------|------|-------|
/// | `GET`  | `/` | `index_path` as a static file |
/// | `GET`  | `/force-refresh` | Runs the pipeline; blocks until it finishes |
/// | `GET`  | `/api/projects` | See [`tenders_api::projects`] |
pub fn router<S, F>(pipeline: Arc<Pipeline<S, F>>, index_path: impl AsRef<Path>) -> Router
where
  S: RecordStore + 'static,
  F: PageSource + 'static,
{
  let api = tenders_api::api_router(pipeline.store().clone());

  Router::new()
    .route_service("/", ServeFile::new(index_path.as_ref()))
    .route("/force-refresh", get(force_refresh::<S, F>))
    .with_state(pipeline)
    .nest("/api", api)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// `GET /force-refresh`
async fn force_refresh<S, F>(State(pipeline): State<Arc<Pipeline<S, F>>>) -> String
where
  S: RecordStore + 'static,
  F: PageSource + 'static,
{
  let processed = pipeline.run().await;
  format!("Manual scrape complete. Processed {processed} projects.")
}

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use tempfile::TempDir;
  use tenders_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  struct StaticPage(&'static str);

  impl PageSource for StaticPage {
    async fn fetch(&self) -> tenders_scrape::Result<String> { Ok(self.0.to_owned()) }
  }

  const LISTING: &str = "<table>
    <tr><th>No</th><th>Department</th><th>Work</th><th>Date</th></tr>
    <tr><td>E-41</td><td>Electrical</td><td>Street lights</td><td>12/09/2024</td></tr>
    <tr><td>E-42</td><td>Electrical</td><td>Signal poles</td><td>13/09/2024</td></tr>
    <tr><td></td><td></td></tr>
  </table>";

  const INDEX: &str = "<!doctype html><title>Tenders</title>";

  struct Fixture {
    dir:      TempDir,
    pipeline: Arc<Pipeline<SqliteStore, StaticPage>>,
  }

  impl Fixture {
    async fn new() -> Self {
      let dir = tempfile::tempdir().unwrap();
      std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
      let store = SqliteStore::open(dir.path().join("tenders.db")).await.unwrap();
      let pipeline = Arc::new(Pipeline::new(Arc::new(store), StaticPage(LISTING)));
      Self { dir, pipeline }
    }

    async fn get(&self, uri: &str) -> Response {
      let req = Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "http://elsewhere.example")
        .body(Body::empty())
        .unwrap();
      router(self.pipeline.clone(), self.dir.path().join("index.html"))
        .oneshot(req)
        .await
        .unwrap()
    }
  }

  async fn body_string(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[tokio::test]
  async fn landing_page_is_served() {
    let fx = Fixture::new().await;
    let resp = fx.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, INDEX);
  }

  #[tokio::test]
  async fn force_refresh_runs_pipeline_then_api_lists_records() {
    let fx = Fixture::new().await;

    let resp = fx.get("/force-refresh").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
      resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain")
    );
    assert_eq!(
      body_string(resp).await,
      "Manual scrape complete. Processed 2 projects."
    );

    let resp = fx.get("/api/projects").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_string(resp).await;
    assert!(body.contains("\"id\":\"E-41\""));
    assert!(body.contains("\"id\":\"E-42\""));
  }

  #[tokio::test]
  async fn api_on_fresh_store_is_empty_array() {
    let fx = Fixture::new().await;
    let resp = fx.get("/api/projects").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "[]");
  }

  #[tokio::test]
  async fn cross_origin_requests_are_allowed() {
    let fx = Fixture::new().await;
    let resp = fx.get("/api/projects").await;
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
  }

  #[tokio::test]
  async fn unknown_path_is_404() {
    let fx = Fixture::new().await;
    assert_eq!(fx.get("/admin").await.status(), StatusCode::NOT_FOUND);
  }
}
