//! All three views for one window, plus the figures used to sanity-check an
//! export.

use serde::Serialize;

use crate::{
  location::{LocationCount, admissions_by_location, total_located},
  log::CaseLog,
  series::{SeriesPoint, admission_series, total_admissions},
  snapshot::{StatusBreakdown, status_breakdown},
  window::Window,
};

/// Totals that should line up when the export is healthy.
///
/// `located_admissions` falls below `series_admissions` by the number of
/// admissions with an unknown finding place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
  pub cases_in_log:       usize,
  pub status_total:       u64,
  pub series_admissions:  u64,
  pub located_admissions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
  pub window:    Window,
  pub status:    StatusBreakdown,
  pub series:    Vec<SeriesPoint>,
  pub locations: Vec<LocationCount>,
  pub totals:    Totals,
}

impl Dashboard {
  pub fn compute(log: &CaseLog, window: Window) -> Self {
    let status = status_breakdown(log, window);
    let series = admission_series(log, window);
    let locations = admissions_by_location(log, window);
    let totals = Totals {
      cases_in_log:       log.case_count(),
      status_total:       status.total(),
      series_admissions:  total_admissions(&series),
      located_admissions: total_located(&locations),
    };
    Self { window, status, series, locations, totals }
  }
}
