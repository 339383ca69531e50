//! tenders server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), initialises the
//! SQLite store, starts the six-hourly scrape scheduler, and serves the
//! landing page and JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tenders_scrape::{HttpFetcher, Pipeline, Scheduler};
use tenders_server::{ServerConfig, settings::expand_tilde};
use tenders_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Tender listing scraper and API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  // A store that cannot be initialised is logged, not fatal: each later
  // operation reports its own failure.
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::at(&store_path);
  if let Err(e) = store.init_schema().await {
    tracing::error!(path = ?store.path(), error = %e, "failed to initialise record store");
  }

  let fetcher = HttpFetcher::new(server_cfg.fetcher_config())
    .context("failed to build HTTP client")?;
  let pipeline = Arc::new(Pipeline::new(Arc::new(store), fetcher));

  if server_cfg.scrape_on_startup {
    pipeline.run().await;
  }

  let scheduler = Scheduler::start(pipeline.clone(), server_cfg.scrape_interval());

  let app = tenders_server::router(pipeline, expand_tilde(&server_cfg.index_path));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  let served = axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error");

  scheduler.stop().await;
  served
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
