//! Error type for `rob-loader`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
  #[error("{location} does not exist")]
  NotFound { location: String },

  /// S3 answers 403 rather than 404 for a missing key when the caller may
  /// not list the bucket.
  #[error("access to {location} is denied; it could be that it does not exist")]
  AccessDenied { location: String },

  #[error("{location} answered with HTTP {status}")]
  Remote { location: String, status: u16 },

  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("i/o error reading {location}: {source}")]
  Io {
    location: String,
    #[source]
    source:   std::io::Error,
  },

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  /// A row failed type coercion; `row` is 1-based and excludes the header.
  #[error("row {row}: column {column} has malformed value {value:?}")]
  Malformed {
    row:    usize,
    column: &'static str,
    value:  String,
  },
}

pub type Result<T, E = LoadError> = std::result::Result<T, E>;
