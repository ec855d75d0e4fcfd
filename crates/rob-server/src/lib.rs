//! HTTP server for the rescue dashboard.
//!
//! Wires configuration, the loaded [`rob_core::CaseLog`] and the JSON API
//! together. The binary in `main.rs` is a thin shell around this crate.

use std::{path::Path, sync::Arc};

use axum::Router;
use rob_api::{ApiState, Station, api_router};
use rob_core::{CaseLog, Clock};
use rob_loader::Source;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `ROB_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:    String,
  pub port:    u16,
  pub source:  Source,
  pub station: Station,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:    "127.0.0.1".to_owned(),
      port:    8050,
      source:  Source::default(),
      station: Station::default(),
    }
  }
}

impl ServerConfig {
  /// Read `path` if it exists, then apply environment overrides such as
  /// `ROB_PORT=9000` or `ROB_SOURCE__KIND=file`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with(path, environment())
  }

  fn load_with(
    path: &Path,
    env: config::Environment,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// `ROB_` variables, with `__` separating nested keys.
fn environment() -> config::Environment {
  config::Environment::with_prefix("ROB")
    .prefix_separator("_")
    .separator("__")
    .try_parsing(true)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: the API under `/api`, with request tracing.
pub fn app(log: CaseLog, clock: Arc<dyn Clock>, station: Station) -> Router {
  let state = ApiState { log, clock, station };
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}
