//! Month labels for a date slider.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::window::midnight;

/// The first instant of a month, as slider position and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthMark {
  /// Seconds since the Unix epoch.
  pub epoch_seconds: i64,
  /// `MM-YYYY`, e.g. `04-2010`.
  pub label:         String,
}

/// One mark per first-of-month instant in the closed range `[min, max]`.
pub fn month_marks(min: DateTime<Utc>, max: DateTime<Utc>) -> Vec<MonthMark> {
  let mut marks = Vec::new();
  let Some(mut month) = NaiveDate::from_ymd_opt(min.year(), min.month(), 1)
  else {
    return marks;
  };
  if midnight(month) < min {
    month = match month.checked_add_months(Months::new(1)) {
      Some(next) => next,
      None => return marks,
    };
  }

  while midnight(month) <= max {
    let at = midnight(month);
    marks.push(MonthMark {
      epoch_seconds: at.timestamp(),
      label:         at.format("%m-%Y").to_string(),
    });
    month = match month.checked_add_months(Months::new(1)) {
      Some(next) => next,
      None => break,
    };
  }
  marks
}
