//! Loads the rescue station's case export into a [`CaseLog`].
//!
//! The export is a CSV file, either on local disk or in a publicly readable
//! S3 bucket. Every column is coerced up front; a single bad row fails the
//! whole load so that no query ever runs against partial data.

mod decode;
mod source;

pub mod error;

pub use decode::parse_csv;
pub use error::{LoadError, Result};
pub use source::{DEFAULT_BUCKET, DEFAULT_KEY, Source, fetch};

use rob_core::CaseLog;

/// Fetch and decode the log described by `source`.
pub async fn load(source: &Source) -> Result<CaseLog> {
  let outcome = fetch_and_parse(source).await;

  match &outcome {
    Ok(log) => tracing::info!(
      %source,
      rows = log.len(),
      cases = log.case_count(),
      "loaded case log"
    ),
    Err(e) => tracing::error!(%source, error = %e, "failed to load case log"),
  }
  outcome
}

async fn fetch_and_parse(source: &Source) -> Result<CaseLog> {
  let body = fetch(source).await?;
  parse_csv(&body)
}

#[cfg(test)]
mod tests;
