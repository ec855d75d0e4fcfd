//! Point-in-time reconstruction of case status.
//!
//! For each case the row with the greatest `record_created_at` strictly before
//! `window.max` is the case's truth at that instant, provided the case was
//! admitted on or after `window.min`. Cases with no such row are not known
//! yet and are absent from the result.

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  case::{CaseId, CaseRecord, CaseStatus},
  log::CaseLog,
  window::Window,
};

/// The latest known status of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
  pub case_id:     CaseId,
  pub status:      CaseStatus,
  /// Creation time of the row the status was read from.
  pub recorded_at: DateTime<Utc>,
}

/// Reduce `log` to one entry per case as of `window.max`, ordered by case.
///
/// When two rows of a case share the greatest creation time, the one that
/// appears later in the log wins.
pub fn snapshot(log: &CaseLog, window: Window) -> Vec<SnapshotEntry> {
  if window.is_empty() {
    return Vec::new();
  }

  let mut latest: BTreeMap<&CaseId, &CaseRecord> = BTreeMap::new();
  for record in log
    .iter()
    .filter(|r| window.admits(r.admission_date, r.record_created_at))
  {
    match latest.entry(&record.case_id) {
      Entry::Vacant(slot) => {
        slot.insert(record);
      }
      Entry::Occupied(mut slot) => {
        if record.record_created_at >= slot.get().record_created_at {
          slot.insert(record);
        }
      }
    }
  }

  let entries: Vec<SnapshotEntry> = latest
    .into_values()
    .map(|r| SnapshotEntry {
      case_id:     r.case_id.clone(),
      status:      r.status,
      recorded_at: r.record_created_at,
    })
    .collect();

  tracing::debug!(
    min = %window.min,
    max = %window.max,
    cases = entries.len(),
    "computed status snapshot"
  );
  entries
}

// ─── Status breakdown ────────────────────────────────────────────────────────

/// Number of cases per status. Statuses with no cases are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusBreakdown(BTreeMap<CaseStatus, u64>);

impl StatusBreakdown {
  pub fn get(&self, status: CaseStatus) -> u64 {
    self.0.get(&status).copied().unwrap_or(0)
  }

  pub fn total(&self) -> u64 { self.0.values().sum() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn iter(&self) -> impl Iterator<Item = (CaseStatus, u64)> + '_ {
    self.0.iter().map(|(s, n)| (*s, *n))
  }
}

impl FromIterator<CaseStatus> for StatusBreakdown {
  fn from_iter<I: IntoIterator<Item = CaseStatus>>(iter: I) -> Self {
    let mut counts = BTreeMap::new();
    for status in iter {
      *counts.entry(status).or_insert(0) += 1;
    }
    Self(counts)
  }
}

/// Count the snapshot at `window.max` by status.
pub fn status_breakdown(log: &CaseLog, window: Window) -> StatusBreakdown {
  snapshot(log, window).into_iter().map(|e| e.status).collect()
}
