//! CSV decoding and column coercion.
//!
//! Column names follow the station's export. Columns not listed here are
//! ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rob_core::{CaseId, CaseLog, CaseRecord, CaseStatus, Location, window::midnight};
use serde::Deserialize;

use crate::{LoadError, Result};

const COL_ID: &str = "Sys_id";
const COL_CREATED: &str = "Erstellt_am";
const COL_ADMITTED: &str = "Einlieferungsdatum";
const COL_SPECIES: &str = "Tierart";
const COL_LAT: &str = "Lat";
const COL_LONG: &str = "Long";
const COL_STATUS: &str = "Aktuell";
const COL_UPDATED: &str = "Sys_aktualisiert_am";

/// Finding places that mean "we don't know".
const UNKNOWN_PLACES: [&str; 3] = ["unknown", "unbekannt", "k.a."];

/// Cell texts the export tooling writes for a missing value. Matched exactly,
/// like an empty cell, in the optional columns only.
const NA_MARKERS: [&str; 12] = [
  "NaN", "-NaN", "nan", "-nan", "NA", "<NA>", "N/A", "n/a", "#N/A", "null",
  "NULL", "None",
];

const DATETIME_FORMATS: [&str; 3] =
  ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d.%m.%Y"];

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// One CSV row before coercion; empty cells arrive as `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
  #[serde(rename = "Sys_id")]
  case_id:        String,
  #[serde(rename = "Erstellt_am")]
  created_at:     String,
  #[serde(rename = "Einlieferungsdatum")]
  admission_date: String,
  #[serde(rename = "Tierart")]
  species:        String,
  #[serde(rename = "Fundort", default)]
  place:          Option<String>,
  #[serde(rename = "Lat", default)]
  latitude:       Option<String>,
  #[serde(rename = "Long", default)]
  longitude:      Option<String>,
  #[serde(rename = "Aktuell")]
  status:         String,
  #[serde(rename = "Sys_aktualisiert_am", default)]
  updated_at:     Option<String>,
}

impl RawRow {
  fn decode(self, row: usize) -> Result<CaseRecord> {
    let malformed = |column: &'static str, value: &str| LoadError::Malformed {
      row,
      column,
      value: value.to_owned(),
    };

    let case_id = non_empty(&self.case_id).ok_or_else(|| malformed(COL_ID, ""))?;
    let record_created_at = parse_timestamp(&self.created_at)
      .ok_or_else(|| malformed(COL_CREATED, &self.created_at))?;
    let admission_date = parse_timestamp(&self.admission_date)
      .ok_or_else(|| malformed(COL_ADMITTED, &self.admission_date))?;
    let species =
      non_empty(&self.species).ok_or_else(|| malformed(COL_SPECIES, ""))?;
    let status: CaseStatus = self
      .status
      .parse()
      .map_err(|_| malformed(COL_STATUS, &self.status))?;

    let latitude = parse_coordinate(self.latitude.as_deref())
      .map_err(|v| malformed(COL_LAT, v))?;
    let longitude = parse_coordinate(self.longitude.as_deref())
      .map_err(|v| malformed(COL_LONG, v))?;
    let location = match (known_place(self.place.as_deref()), latitude, longitude)
    {
      (Some(place), Some(latitude), Some(longitude)) => Some(Location {
        place: place.to_owned(),
        latitude,
        longitude,
      }),
      _ => None,
    };

    let updated_at = match self.updated_at.as_deref().and_then(present) {
      Some(raw) => {
        Some(parse_timestamp(raw).ok_or_else(|| malformed(COL_UPDATED, raw))?)
      }
      None => None,
    };

    Ok(CaseRecord {
      case_id: CaseId::new(case_id),
      record_created_at,
      admission_date,
      species: species.to_owned(),
      location,
      status,
      updated_at,
    })
  }
}

// ─── Coercion helpers ────────────────────────────────────────────────────────

fn non_empty(s: &str) -> Option<&str> {
  let s = s.trim();
  (!s.is_empty()).then_some(s)
}

/// An optional cell that holds a real value.
fn present(s: &str) -> Option<&str> {
  non_empty(s).filter(|s| !NA_MARKERS.contains(s))
}

fn known_place(place: Option<&str>) -> Option<&str> {
  place
    .and_then(present)
    .filter(|p| !UNKNOWN_PLACES.iter().any(|u| p.eq_ignore_ascii_case(u)))
}

/// `Ok(None)` for an empty cell, `Err(raw)` for text that is not a number.
fn parse_coordinate(raw: Option<&str>) -> Result<Option<f64>, &str> {
  match raw.and_then(present) {
    None => Ok(None),
    Some(s) => match s.parse::<f64>() {
      Ok(v) if v.is_finite() => Ok(Some(v)),
      _ => Err(s),
    },
  }
}

/// Parse a timestamp as exported; values without an offset are UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let s = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  if let Some(dt) = DATETIME_FORMATS
    .iter()
    .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
  {
    return Some(dt.and_utc());
  }
  DATE_FORMATS
    .iter()
    .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    .map(midnight)
}

// ─── Entry point ─────────────────────────────────────────────────────────────

/// Decode a complete CSV export. Fails on the first row that cannot be
/// coerced.
pub fn parse_csv(body: &[u8]) -> Result<CaseLog> {
  let mut reader = csv::ReaderBuilder::new()
    .trim(csv::Trim::All)
    .from_reader(body);

  let mut records = Vec::new();
  for (index, row) in reader.deserialize::<RawRow>().enumerate() {
    records.push(row?.decode(index + 1)?);
  }

  let log = CaseLog::new(records);
  let unlocated = log.iter().filter(|r| r.location.is_none()).count();
  if unlocated > 0 {
    tracing::debug!(unlocated, "rows without a known finding place");
  }
  Ok(log)
}
