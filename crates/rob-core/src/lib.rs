//! Core types and views for the seal rescue dashboard.
//!
//! A [`CaseLog`] is an append-only history of case updates. Every view in this
//! crate is a pure function of a log and a half-open [`Window`]; nothing here
//! performs I/O or keeps state between calls.

pub mod case;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod log;
pub mod marks;
pub mod series;
pub mod snapshot;
pub mod window;

#[cfg(test)]
mod fixtures;

pub use case::{CaseId, CaseRecord, CaseStatus, Location};
pub use error::{Error, Result};
pub use log::CaseLog;
pub use window::{Clock, EPOCH, FixedClock, SystemClock, Window};
