//! Shared builders for unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::{CaseId, CaseRecord, CaseStatus, Location};

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// A harbour-seal record with no known location.
pub fn record(
  case_id: &str,
  created: DateTime<Utc>,
  admitted: DateTime<Utc>,
  status: CaseStatus,
) -> CaseRecord {
  CaseRecord {
    case_id: CaseId::new(case_id),
    record_created_at: created,
    admission_date: admitted,
    species: "Seehund".into(),
    location: None,
    status,
    updated_at: None,
  }
}

pub fn with_species(mut r: CaseRecord, species: &str) -> CaseRecord {
  r.species = species.into();
  r
}

pub fn with_location(
  mut r: CaseRecord,
  place: &str,
  latitude: f64,
  longitude: f64,
) -> CaseRecord {
  r.location = Some(Location { place: place.into(), latitude, longitude });
  r
}
