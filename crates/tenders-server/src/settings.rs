//! Server configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, `TENDERS_*` environment variables, and finally a bare `PORT`
//! variable as set by most hosting platforms.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;
use tenders_scrape::{FetcherConfig, fetch::DEFAULT_USER_AGENT};

pub const DEFAULT_SOURCE_URL: &str = "https://mbmc.gov.in/mbmc/etender-mbmc";

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  pub source_url:           String,
  /// Landing page served at `/`.
  pub index_path:           PathBuf,
  pub scrape_interval_secs: u64,
  /// Run one scrape before the listener starts.
  pub scrape_on_startup:    bool,
  pub fetch_timeout_secs:   u64,
  pub user_agent:           String,
  /// Disable TLS certificate validation for the listing fetch. On by default
  /// because the tender portal's certificate does not validate.
  pub accept_invalid_certs: bool,
}

impl ServerConfig {
  /// Load from `file` and the process environment.
  pub fn load(file: &Path) -> Result<Self, ConfigError> {
    Self::load_with(file, None, std::env::var("PORT").ok())
  }

  /// Load from `file`, taking `TENDERS_*` variables from `env` instead of the
  /// process environment when it is `Some`, and the bare `PORT` from `port`.
  pub fn load_with(
    file: &Path,
    env:  Option<Map<String, String>>,
    port: Option<String>,
  ) -> Result<Self, ConfigError> {
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 5000_i64)?
      .set_default("store_path", "mbmc_data.db")?
      .set_default("source_url", DEFAULT_SOURCE_URL)?
      .set_default("index_path", "static/index.html")?
      .set_default("scrape_interval_secs", 6 * 60 * 60_i64)?
      .set_default("scrape_on_startup", true)?
      .set_default("fetch_timeout_secs", 30_i64)?
      .set_default("user_agent", DEFAULT_USER_AGENT)?
      .set_default("accept_invalid_certs", true)?
      .add_source(File::from(file).required(false))
      .add_source(
        Environment::with_prefix("TENDERS")
          .try_parsing(true)
          .source(env),
      )
      .set_override_option("port", port)?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn scrape_interval(&self) -> Duration {
    Duration::from_secs(self.scrape_interval_secs)
  }

  pub fn fetcher_config(&self) -> FetcherConfig {
    FetcherConfig {
      url:                  self.source_url.clone(),
      timeout:              Duration::from_secs(self.fetch_timeout_secs),
      user_agent:           self.user_agent.clone(),
      accept_invalid_certs: self.accept_invalid_certs,
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg =
      ServerConfig::load_with(&dir.path().join("absent.toml"), env(&[]), None)
        .unwrap();

    assert_eq!(cfg.store_path, PathBuf::from("mbmc_data.db"));
    assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(cfg.scrape_interval(), Duration::from_secs(21_600));
    assert!(cfg.scrape_on_startup);

    let fetcher = cfg.fetcher_config();
    assert_eq!(fetcher.timeout, Duration::from_secs(30));
    assert_eq!(fetcher.user_agent, DEFAULT_USER_AGENT);
    assert!(fetcher.accept_invalid_certs);
  }

  #[test]
  fn file_values_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(
      &file,
      "store_path = \"/var/lib/tenders/data.db\"\n\
       scrape_interval_secs = 900\n\
       accept_invalid_certs = false\n",
    )
    .unwrap();

    let cfg = ServerConfig::load_with(&file, env(&[]), None).unwrap();
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/tenders/data.db"));
    assert_eq!(cfg.scrape_interval(), Duration::from_secs(900));
    assert!(!cfg.fetcher_config().accept_invalid_certs);
  }

  fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
    Some(
      vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect(),
    )
  }

  #[test]
  fn port_variable_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("config.toml");
    std::fs::write(&file, "port = 7000\n").unwrap();

    let from_file = ServerConfig::load_with(&file, env(&[]), None).unwrap();
    assert_eq!(from_file.port, 7000);

    let cfg =
      ServerConfig::load_with(&file, env(&[]), Some("8123".into())).unwrap();
    assert_eq!(cfg.port, 8123);
    assert_eq!(cfg.address(), "0.0.0.0:8123");
  }

  #[test]
  fn prefixed_variables_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ServerConfig::load_with(
      &dir.path().join("absent.toml"),
      env(&[
        ("TENDERS_SCRAPE_ON_STARTUP", "false"),
        ("TENDERS_STORE_PATH", "/tmp/x.db"),
      ]),
      None,
    )
    .unwrap();

    assert!(!cfg.scrape_on_startup);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/x.db"));
    assert_eq!(cfg.port, 5000);
  }

  #[test]
  fn port_variable_beats_prefixed_port() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = ServerConfig::load_with(
      &dir.path().join("absent.toml"),
      env(&[("TENDERS_PORT", "6000")]),
      Some("8123".into()),
    )
    .unwrap();
    assert_eq!(cfg.port, 8123);

    let without_port = ServerConfig::load_with(
      &dir.path().join("absent.toml"),
      env(&[("TENDERS_PORT", "6000")]),
      None,
    )
    .unwrap();
    assert_eq!(without_port.port, 6000);
  }

  #[test]
  fn tilde_only_expands_as_a_prefix() {
    let plain = Path::new("data/~/tenders.db");
    assert_eq!(expand_tilde(plain), plain.to_path_buf());
  }
}
