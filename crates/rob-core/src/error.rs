//! Error types for `rob-core`.
//!
//! Views never fail; errors only arise when turning caller-supplied text into
//! typed values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("unknown case status: {0:?}")]
  UnknownStatus(String),

  #[error("invalid date: {0:?}")]
  InvalidDate(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
