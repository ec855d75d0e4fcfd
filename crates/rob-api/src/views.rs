//! Handlers for the view endpoints.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET`  | `/status` | status → count at `max_date`, plus total |
//! | `GET`  | `/snapshot` | latest status per case at `max_date` |
//! | `GET`  | `/series` | weekly admissions per species |
//! | `GET`  | `/locations` | admissions per finding place |
//! | `GET`  | `/meta` | freshness, suggested window, month marks, station |
//!
//! Every view endpoint takes optional `min_date` / `max_date` query
//! parameters (`YYYY-MM-DD` or RFC 3339). Missing bounds default to
//! 1990-04-30 and now.
//!
//! A `+` in a query string decodes to a space, so an RFC 3339 offset must be
//! sent percent-encoded (`2020-01-15T00:00:00%2B01:00`) or written in the `Z`
//! form. A bare `+01:00` is rejected with `400`.

use axum::{
  extract::{Query, State},
  http::{HeaderMap, HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rob_core::{
  Clock, Window,
  location::{LocationCount, admissions_by_location},
  marks::{MonthMark, month_marks},
  series::{SeriesPoint, admission_series},
  snapshot::{SnapshotEntry, StatusBreakdown, snapshot, status_breakdown},
  window::parse_instant,
};
use serde::{Deserialize, Serialize};

use crate::{
  ApiState, Station,
  error::ApiError,
  etag::{compute_etag, matches_if_none_match},
};

// ─── Parameters ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
  pub min_date: Option<String>,
  pub max_date: Option<String>,
}

impl WindowParams {
  /// Parse both bounds, filling in defaults from `clock`.
  pub fn resolve(&self, clock: &dyn Clock) -> Result<Window, ApiError> {
    let min = self.min_date.as_deref().map(parse_instant).transpose()?;
    let max = self.max_date.as_deref().map(parse_instant).transpose()?;
    Ok(Window::resolve(min, max, clock))
  }
}

// ─── Response bodies ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StatusBody {
  #[serde(flatten)]
  pub window: Window,
  pub counts: StatusBreakdown,
  pub total:  u64,
}

#[derive(Debug, Serialize)]
pub struct SnapshotBody {
  #[serde(flatten)]
  pub window: Window,
  pub cases:  Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize)]
pub struct SeriesBody {
  #[serde(flatten)]
  pub window: Window,
  pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct LocationsBody {
  #[serde(flatten)]
  pub window:    Window,
  pub locations: Vec<LocationCount>,
}

#[derive(Debug, Serialize)]
pub struct MetaBody {
  pub last_updated:     Option<DateTime<Utc>>,
  pub records:          usize,
  pub cases:            usize,
  pub suggested_window: Option<Window>,
  pub marks:            Vec<MonthMark>,
  pub station:          Station,
}

/// Encode `body` as JSON with a strong ETag, answering `304` when the client
/// already holds it.
fn cached_json<T: Serialize>(
  headers: &HeaderMap,
  body: &T,
) -> Result<Response, ApiError> {
  let bytes = serde_json::to_vec(body)?;
  let etag = compute_etag(&bytes);
  let etag_value = HeaderValue::from_str(&etag)
    .map_err(|e| ApiError::Internal(e.to_string()))?;

  if matches_if_none_match(headers, &etag) {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag_value)]).into_response());
  }

  Ok(
    (
      StatusCode::OK,
      [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
        (header::ETAG, etag_value),
      ],
      bytes,
    )
      .into_response(),
  )
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /status`
pub async fn status(
  State(state): State<ApiState>,
  Query(params): Query<WindowParams>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let window = params.resolve(state.clock.as_ref())?;
  let counts = status_breakdown(&state.log, window);
  let total = counts.total();
  cached_json(&headers, &StatusBody { window, counts, total })
}

/// `GET /snapshot`
pub async fn snapshot_view(
  State(state): State<ApiState>,
  Query(params): Query<WindowParams>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let window = params.resolve(state.clock.as_ref())?;
  let cases = snapshot(&state.log, window);
  cached_json(&headers, &SnapshotBody { window, cases })
}

/// `GET /series`
pub async fn series(
  State(state): State<ApiState>,
  Query(params): Query<WindowParams>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let window = params.resolve(state.clock.as_ref())?;
  let points = admission_series(&state.log, window);
  cached_json(&headers, &SeriesBody { window, points })
}

/// `GET /locations`
pub async fn locations(
  State(state): State<ApiState>,
  Query(params): Query<WindowParams>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let window = params.resolve(state.clock.as_ref())?;
  let locations = admissions_by_location(&state.log, window);
  cached_json(&headers, &LocationsBody { window, locations })
}

/// `GET /meta`
pub async fn meta(
  State(state): State<ApiState>,
  headers: HeaderMap,
) -> Result<Response, ApiError> {
  let suggested_window = state.log.suggested_window();
  let marks = suggested_window
    .map(|w| month_marks(w.min, w.max))
    .unwrap_or_default();
  cached_json(&headers, &MetaBody {
    last_updated: state.log.last_updated(),
    records: state.log.len(),
    cases: state.log.case_count(),
    suggested_window,
    marks,
    station: state.station.clone(),
  })
}
