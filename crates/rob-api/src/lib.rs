//! JSON read API over the rescue case log.
//!
//! Exposes an axum [`Router`] over one immutable [`CaseLog`]. Every view is
//! recomputed per request from the shared log; nothing is cached server-side.
//! Responses carry an `ETag` so clients can revalidate cheaply.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rob_api::api_router(state))
//! ```

pub mod error;
pub mod etag;
pub mod views;

use std::sync::Arc;

use axum::{Router, routing::get};
use rob_core::{CaseLog, Clock};
use serde::{Deserialize, Serialize};

pub use error::ApiError;

// ─── Station ──────────────────────────────────────────────────────────────────

/// The rescue station itself, drawn as a reference point on the map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Station {
  pub name:      String,
  pub latitude:  f64,
  pub longitude: f64,
}

impl Default for Station {
  fn default() -> Self {
    Self {
      name:      "Seehundstation Friedrichskoog".to_owned(),
      latitude:  54.00089266779337,
      longitude: 8.876683012541077,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct ApiState {
  pub log:     CaseLog,
  pub clock:   Arc<dyn Clock>,
  pub station: Station,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router(state: ApiState) -> Router<()> {
  Router::new()
    .route("/status", get(views::status))
    .route("/snapshot", get(views::snapshot_view))
    .route("/series", get(views::series))
    .route("/locations", get(views::locations))
    .route("/meta", get(views::meta))
    .with_state(state)
}
