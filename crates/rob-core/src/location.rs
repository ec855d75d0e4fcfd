//! Admissions per finding place, for plotting on a map.

use std::{
  cmp::Ordering,
  collections::{BTreeMap, BTreeSet, HashSet},
};

use serde::{Deserialize, Serialize};

use crate::{
  case::{CaseId, CaseRecord, Location},
  log::CaseLog,
  window::Window,
};

/// Number of distinct cases found at one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCount {
  pub place:     String,
  pub latitude:  f64,
  pub longitude: f64,
  pub count:     u64,
}

/// A coordinate ordered by [`f64::total_cmp`], so equal keys are bit-equal.
#[derive(Debug, Clone, Copy)]
struct Coord(f64);

impl PartialEq for Coord {
  fn eq(&self, other: &Self) -> bool { self.cmp(other).is_eq() }
}

impl Eq for Coord {}

impl PartialOrd for Coord {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Coord {
  fn cmp(&self, other: &Self) -> Ordering { self.0.total_cmp(&other.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct PlaceKey<'a> {
  place:     &'a str,
  latitude:  Coord,
  longitude: Coord,
}

impl<'a> From<&'a Location> for PlaceKey<'a> {
  fn from(loc: &'a Location) -> Self {
    Self {
      place:     &loc.place,
      latitude:  Coord(loc.latitude),
      longitude: Coord(loc.longitude),
    }
  }
}

/// Count distinct cases per finding place among those admitted inside
/// `window`. Records without a known location do not contribute.
pub fn admissions_by_location(
  log: &CaseLog,
  window: Window,
) -> Vec<LocationCount> {
  // Duplicates are dropped across the whole log before the window applies.
  let mut seen = HashSet::new();
  let events: Vec<(&CaseRecord, &Location)> = log
    .iter()
    .filter_map(|r| r.location.as_ref().map(|loc| (r, loc)))
    .filter(|(r, loc)| {
      seen.insert((
        &r.case_id,
        r.admission_date,
        loc.place.as_str(),
        loc.latitude.to_bits(),
        loc.longitude.to_bits(),
      ))
    })
    .collect();

  let mut cases: BTreeMap<PlaceKey<'_>, BTreeSet<&CaseId>> = BTreeMap::new();
  for (record, loc) in
    window.select(&events, |(r, _): &(&CaseRecord, &Location)| r.admission_date)
  {
    cases
      .entry(PlaceKey::from(*loc))
      .or_default()
      .insert(&record.case_id);
  }

  let counts: Vec<LocationCount> = cases
    .into_iter()
    .map(|(key, ids)| LocationCount {
      place:     key.place.to_owned(),
      latitude:  key.latitude.0,
      longitude: key.longitude.0,
      count:     ids.len() as u64,
    })
    .collect();

  tracing::debug!(
    min = %window.min,
    max = %window.max,
    places = counts.len(),
    "computed admissions by location"
  );
  counts
}

/// Sum of all counts in `locations`.
pub fn total_located(locations: &[LocationCount]) -> u64 {
  locations.iter().map(|l| l.count).sum()
}
