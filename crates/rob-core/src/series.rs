//! Weekly admissions per species.
//!
//! Update rows are collapsed to one admission event per
//! `(case_id, admission_date, species)` over the whole log before any
//! windowing; the window then applies to the week a bucket starts on.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  log::CaseLog,
  window::{Window, midnight},
};

/// Admissions of one species during the week starting at `week_start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
  pub species:    String,
  /// Midnight UTC on the Monday that opens the week.
  pub week_start: DateTime<Utc>,
  pub count:      u64,
}

/// Midnight UTC of the Monday on or before `t`.
pub fn week_start(t: DateTime<Utc>) -> DateTime<Utc> {
  let date = t.date_naive();
  let back = TimeDelta::days(i64::from(date.weekday().num_days_from_monday()));
  midnight(date - back)
}

/// Count admission events per `(species, week)`, keeping only weeks that
/// start inside `window`. Weeks without admissions are not emitted.
pub fn admission_series(log: &CaseLog, window: Window) -> Vec<SeriesPoint> {
  let mut seen = HashSet::new();
  let mut buckets: BTreeMap<(&str, DateTime<Utc>), u64> = BTreeMap::new();

  for record in log {
    let event = (&record.case_id, record.admission_date, record.species.as_str());
    if !seen.insert(event) {
      continue;
    }
    *buckets
      .entry((record.species.as_str(), week_start(record.admission_date)))
      .or_default() += 1;
  }

  let points: Vec<SeriesPoint> = buckets
    .into_iter()
    .filter(|((_, week), _)| window.contains(*week))
    .map(|((species, week), count)| SeriesPoint {
      species: species.to_owned(),
      week_start: week,
      count,
    })
    .collect();

  tracing::debug!(
    min = %window.min,
    max = %window.max,
    points = points.len(),
    "computed admission series"
  );
  points
}

/// Sum of all admission events in `points`.
pub fn total_admissions(points: &[SeriesPoint]) -> u64 {
  points.iter().map(|p| p.count).sum()
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;
  use crate::{
    CaseStatus,
    fixtures::{at, record, with_species},
  };

  fn admitted(id: &str, species: &str, day: DateTime<Utc>) -> crate::CaseRecord {
    with_species(record(id, day, day, CaseStatus::InRehabilitation), species)
  }

  fn everything() -> Window { Window::new(at(1990, 4, 30), at(2100, 1, 1)) }

  #[test]
  fn week_start_is_the_preceding_monday() {
    // 2020-01-06 is a Monday.
    assert_eq!(week_start(at(2020, 1, 6)), at(2020, 1, 6));
    assert_eq!(week_start(at(2020, 1, 8)), at(2020, 1, 6));
    assert_eq!(
      week_start(Utc.with_ymd_and_hms(2020, 1, 12, 23, 59, 59).unwrap()),
      at(2020, 1, 6)
    );
    assert_eq!(week_start(at(2020, 1, 13)), at(2020, 1, 13));
  }

  #[test]
  fn two_cases_in_one_week_share_a_point() {
    let log = CaseLog::new(vec![
      admitted("A", "X", at(2020, 1, 7)),
      admitted("B", "X", at(2020, 1, 10)),
    ]);
    let points = admission_series(&log, everything());
    assert_eq!(points, vec![SeriesPoint {
      species:    "X".into(),
      week_start: at(2020, 1, 6),
      count:      2,
    }]);
  }

  #[test]
  fn update_rows_collapse_to_one_admission() {
    let mut update = admitted("A", "Seehund", at(2020, 1, 7));
    update.record_created_at = at(2020, 3, 1);
    update.status = CaseStatus::Released;
    let log = CaseLog::new(vec![admitted("A", "Seehund", at(2020, 1, 7)), update]);

    let points = admission_series(&log, everything());
    assert_eq!(total_admissions(&points), 1);
  }

  #[test]
  fn species_are_kept_apart_and_sorted() {
    let log = CaseLog::new(vec![
      admitted("A", "Seehund", at(2020, 1, 7)),
      admitted("B", "Kegelrobbe", at(2020, 1, 7)),
      admitted("C", "Seehund", at(2020, 1, 21)),
    ]);
    let points = admission_series(&log, everything());
    let keys: Vec<_> = points
      .iter()
      .map(|p| (p.species.as_str(), p.week_start, p.count))
      .collect();
    assert_eq!(keys, vec![
      ("Kegelrobbe", at(2020, 1, 6), 1),
      ("Seehund", at(2020, 1, 6), 1),
      ("Seehund", at(2020, 1, 20), 1),
    ]);
  }

  #[test]
  fn window_applies_to_week_start() {
    let log = CaseLog::new(vec![
      admitted("A", "X", at(2020, 1, 8)),
      admitted("B", "X", at(2020, 1, 14)),
    ]);
    // Starts mid-week: the week of 2020-01-06 begins before the window.
    let points = admission_series(&log, Window::new(at(2020, 1, 8), at(2020, 2, 1)));
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].week_start, at(2020, 1, 13));

    // Upper bound exactly on a week start excludes that week.
    let points = admission_series(&log, Window::new(at(2020, 1, 1), at(2020, 1, 13)));
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].week_start, at(2020, 1, 6));
  }

  #[test]
  fn widening_never_loses_events() {
    let log = CaseLog::new(vec![
      admitted("A", "X", at(2020, 1, 7)),
      admitted("B", "X", at(2020, 2, 18)),
      admitted("C", "Y", at(2020, 6, 2)),
    ]);
    let narrow = admission_series(&log, Window::new(at(2020, 2, 1), at(2020, 3, 1)));
    let wide = admission_series(&log, Window::new(at(2020, 1, 1), at(2020, 7, 1)));
    assert_eq!(total_admissions(&narrow), 1);
    assert_eq!(total_admissions(&wide), 3);
  }

  #[test]
  fn repeated_queries_are_identical() {
    let log = CaseLog::new(vec![
      admitted("D", "Seehund", at(2020, 3, 3)),
      admitted("A", "Kegelrobbe", at(2020, 1, 7)),
      admitted("C", "Schweinswal", at(2020, 2, 11)),
      admitted("B", "Seehund", at(2020, 1, 8)),
      admitted("E", "Kegelrobbe", at(2020, 3, 4)),
    ]);
    let first = admission_series(&log, everything());
    for _ in 0..10 {
      assert_eq!(admission_series(&log, everything()), first);
    }
    let order: Vec<_> =
      first.iter().map(|p| (p.species.as_str(), p.week_start)).collect();
    assert_eq!(order, vec![
      ("Kegelrobbe", at(2020, 1, 6)),
      ("Kegelrobbe", at(2020, 3, 2)),
      ("Schweinswal", at(2020, 2, 10)),
      ("Seehund", at(2020, 1, 6)),
      ("Seehund", at(2020, 3, 2)),
    ]);
  }

  #[test]
  fn empty_log_and_inverted_window_yield_nothing() {
    assert!(admission_series(&CaseLog::default(), everything()).is_empty());

    let log = CaseLog::new(vec![admitted("A", "X", at(2020, 1, 7))]);
    let inverted = Window::new(at(2020, 2, 1), at(2020, 1, 1));
    assert!(admission_series(&log, inverted).is_empty());
  }
}
