//! Case records — one row of the rescue station's change-log.
//!
//! A case is updated by appending a new record that repeats the case
//! identifier. Records are never edited in place; the state of a case at any
//! instant is recovered by [`crate::snapshot`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Identifier shared by every record of one case.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CaseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<&str> for CaseId {
  fn from(s: &str) -> Self { Self::new(s) }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where an animal stands in its rescue at the time a record was written.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
  InRehabilitation,
  Released,
  Deceased,
}

impl CaseStatus {
  pub const ALL: [Self; 3] =
    [Self::InRehabilitation, Self::Released, Self::Deceased];

  /// The code used in serialised output, e.g. `"in_rehabilitation"`.
  pub fn code(self) -> &'static str {
    match self {
      Self::InRehabilitation => "in_rehabilitation",
      Self::Released => "released",
      Self::Deceased => "deceased",
    }
  }
}

impl fmt::Display for CaseStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

/// Accepts the English codes as well as the German labels found in the
/// station's export.
impl FromStr for CaseStatus {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let normalised = s.trim().to_lowercase().replace(['-', ' '], "_");
    match normalised.as_str() {
      "in_rehabilitation" | "rehabilitation" | "reha" | "in_reha" => {
        Ok(Self::InRehabilitation)
      }
      "released" | "ausgewildert" => Ok(Self::Released),
      "deceased" | "dead" | "verstorben" | "tot" => Ok(Self::Deceased),
      _ => Err(Error::UnknownStatus(s.to_owned())),
    }
  }
}

// ─── Location ────────────────────────────────────────────────────────────────

/// A finding place with its coordinates.
///
/// Only constructed when the place and both coordinates are known; records
/// with an unknown location carry `None` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
  pub place:     String,
  pub latitude:  f64,
  pub longitude: f64,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One entry of the case log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
  pub case_id:           CaseId,
  /// When this row was produced.
  pub record_created_at: DateTime<Utc>,
  /// When the animal was admitted; the same for every row of a case.
  pub admission_date:    DateTime<Utc>,
  pub species:           String,
  pub location:          Option<Location>,
  pub status:            CaseStatus,
  /// The source system's own modification stamp, if exported.
  pub updated_at:        Option<DateTime<Utc>>,
}
