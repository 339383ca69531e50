//! Page fetching.
//!
//! [`PageSource`] is the seam the pipeline reads through; [`HttpFetcher`] is
//! the real implementation, a single GET with no retries.

use std::{future::Future, time::Duration};

use reqwest::{Client, StatusCode};

use crate::{Error, Result};

/// A desktop browser identity. The source site rejects unfamiliar clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
  AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that yields the raw markup of the listing page.
pub trait PageSource: Send + Sync {
  fn fetch(&self) -> impl Future<Output = Result<String>> + Send + '_;
}

// ─── Configuration ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FetcherConfig {
  pub url:                  String,
  pub timeout:              Duration,
  pub user_agent:           String,
  /// Skip TLS certificate validation. The tender portal serves a broken
  /// certificate chain, so deployments against it have to opt in to this.
  pub accept_invalid_certs: bool,
}

impl FetcherConfig {
  /// Defaults for `url`: 30 second timeout, browser user agent, certificates
  /// validated.
  pub fn new(url: impl Into<String>) -> Self {
    Self {
      url:                  url.into(),
      timeout:              DEFAULT_TIMEOUT,
      user_agent:           DEFAULT_USER_AGENT.to_owned(),
      accept_invalid_certs: false,
    }
  }
}

// ─── Fetcher ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: Client,
  config: FetcherConfig,
}

impl HttpFetcher {
  pub fn new(config: FetcherConfig) -> Result<Self> {
    if config.accept_invalid_certs {
      tracing::warn!(
        url = %config.url,
        "TLS certificate validation is disabled for the listing fetcher"
      );
    }

    let client = Client::builder()
      .timeout(config.timeout)
      .user_agent(config.user_agent.clone())
      .danger_accept_invalid_certs(config.accept_invalid_certs)
      .build()?;

    Ok(Self { client, config })
  }
}

impl PageSource for HttpFetcher {
  async fn fetch(&self) -> Result<String> {
    let resp = self.client.get(&self.config.url).send().await?;

    let status = resp.status();
    if status != StatusCode::OK {
      return Err(Error::Status(status));
    }

    Ok(resp.text().await?)
  }
}
