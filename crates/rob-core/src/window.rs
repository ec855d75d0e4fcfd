//! The half-open reporting window shared by every view.
//!
//! A row is inside `[min, max)` when `min <= t && t < max`. An inverted or
//! zero-width window contains nothing; that is an ordinary empty result, not
//! an error.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Seconds since the Unix epoch of 1990-04-30T00:00:00Z.
const EPOCH_SECS: i64 = 641_433_600;

/// Lower bound used when a caller does not supply one.
pub static EPOCH: std::sync::LazyLock<DateTime<Utc>> =
  std::sync::LazyLock::new(|| {
    DateTime::from_timestamp(EPOCH_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
  });

// ─── Clock ───────────────────────────────────────────────────────────────────

/// Supplies "now" as the default upper bound.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> { self.0 }
}

// ─── Window ──────────────────────────────────────────────────────────────────

/// A half-open interval `[min, max)` of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
  #[serde(rename = "min_date")]
  pub min: DateTime<Utc>,
  #[serde(rename = "max_date")]
  pub max: DateTime<Utc>,
}

impl Window {
  pub fn new(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
    Self { min, max }
  }

  /// Fill in missing bounds: `min` defaults to [`EPOCH`], `max` to
  /// `clock.now()`.
  pub fn resolve(
    min: Option<DateTime<Utc>>,
    max: Option<DateTime<Utc>>,
    clock: &dyn Clock,
  ) -> Self {
    Self {
      min: min.unwrap_or(*EPOCH),
      max: max.unwrap_or_else(|| clock.now()),
    }
  }

  /// True when no instant can satisfy `min <= t < max`.
  pub fn is_empty(&self) -> bool { self.min >= self.max }

  pub fn contains(&self, t: DateTime<Utc>) -> bool {
    self.min <= t && t < self.max
  }

  /// The two-column gate: the case must have been admitted on or after `min`
  /// and the row must have been written before `max`.
  pub fn admits(
    &self,
    admission: DateTime<Utc>,
    recorded: DateTime<Utc>,
  ) -> bool {
    admission >= self.min && recorded < self.max
  }

  /// Lazily keep the rows whose `key` timestamp falls inside the window,
  /// preserving input order.
  pub fn select<'a, T, I, F>(
    &self,
    rows: I,
    key: F,
  ) -> impl Iterator<Item = &'a T> + 'a
  where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    I::IntoIter: 'a,
    F: Fn(&T) -> DateTime<Utc> + 'a,
  {
    let window = *self;
    rows.into_iter().filter(move |row| window.contains(key(*row)))
  }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Midnight UTC at the start of `date`.
pub fn midnight(date: NaiveDate) -> DateTime<Utc> {
  date.and_time(NaiveTime::MIN).and_utc()
}

/// Parse a caller-supplied bound: either a calendar date (`YYYY-MM-DD`, taken
/// as midnight UTC) or an RFC 3339 timestamp.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
  let s = s.trim();
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(midnight(date));
  }
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|_| Error::InvalidDate(s.to_owned()))
}
