//! Strong ETags for view responses.
//!
//! Views are deterministic functions of the loaded log and the window, so a
//! hash of the encoded body identifies a response exactly.

use axum::http::{HeaderMap, HeaderValue, header};
use sha2::{Digest, Sha256};

/// Quoted SHA-256 hex digest of `body`.
pub fn compute_etag(body: &[u8]) -> String {
  format!("\"{}\"", hex::encode(Sha256::digest(body)))
}

/// True when the request's `If-None-Match` lists `etag` (or `*`).
pub fn matches_if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  headers
    .get_all(header::IF_NONE_MATCH)
    .iter()
    .filter_map(|v: &HeaderValue| v.to_str().ok())
    .flat_map(|v| v.split(','))
    .map(|tag| tag.trim().trim_start_matches("W/"))
    .any(|tag| tag == "*" || tag == etag)
}
