//! JSON API over the tender record store.
//!
//! Exposes an axum [`Router`] backed by any [`tenders_core::RecordStore`].
//! CORS, static files and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tenders_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod projects;

use std::sync::Arc;

use axum::{Router, routing::get};
use tenders_core::RecordStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    .route("/projects", get(projects::list::<S>))
    .with_state(store)
}
