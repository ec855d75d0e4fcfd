//! The in-memory case log.
//!
//! Loaded once and then only ever read. Cloning shares the same backing
//! slice, so one log can serve any number of concurrent queries.

use std::{collections::HashSet, sync::Arc};

use chrono::{DateTime, TimeDelta, Utc};

use crate::{
  case::CaseRecord,
  window::{Window, midnight},
};

/// Padding applied on both sides of [`CaseLog::suggested_window`].
const SUGGESTED_PADDING_DAYS: i64 = 14;

/// An immutable, append-only history of case updates in source order.
#[derive(Debug, Clone, Default)]
pub struct CaseLog {
  records: Arc<[CaseRecord]>,
}

impl CaseLog {
  pub fn new(records: Vec<CaseRecord>) -> Self {
    Self { records: records.into() }
  }

  pub fn records(&self) -> &[CaseRecord] { &self.records }

  pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> { self.records.iter() }

  pub fn len(&self) -> usize { self.records.len() }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Number of distinct cases, regardless of how many updates each has.
  pub fn case_count(&self) -> usize {
    self
      .records
      .iter()
      .map(|r| &r.case_id)
      .collect::<HashSet<_>>()
      .len()
  }

  /// When the source data was last modified.
  ///
  /// Rows without a modification stamp count with their creation time.
  pub fn last_updated(&self) -> Option<DateTime<Utc>> {
    self
      .records
      .iter()
      .map(|r| r.updated_at.unwrap_or(r.record_created_at))
      .max()
  }

  /// The date range to offer by default: two weeks before the first
  /// admission up to two weeks after the last update, on day boundaries.
  pub fn suggested_window(&self) -> Option<Window> {
    let padding = TimeDelta::days(SUGGESTED_PADDING_DAYS);
    let first = self.records.iter().map(|r| r.admission_date).min()?;
    let last = self.records.iter().map(|r| r.record_created_at).max()?;
    Some(Window::new(
      midnight((first - padding).date_naive()),
      midnight((last + padding).date_naive()),
    ))
  }
}

impl FromIterator<CaseRecord> for CaseLog {
  fn from_iter<I: IntoIterator<Item = CaseRecord>>(iter: I) -> Self {
    Self { records: iter.into_iter().collect() }
  }
}

impl<'a> IntoIterator for &'a CaseLog {
  type Item = &'a CaseRecord;
  type IntoIter = std::slice::Iter<'a, CaseRecord>;

  fn into_iter(self) -> Self::IntoIter { self.records.iter() }
}
