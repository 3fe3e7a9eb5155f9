use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::Interval;

/// A range reported as occupied by the external calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }
}

/// Outcome of asking the external calendar for busy intervals.
///
/// `Unavailable` carries the reason for logging only; callers treat it exactly
/// like an empty busy set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusyLookup {
    Available(Vec<BusyInterval>),
    Unavailable(String),
}

impl BusyLookup {
    pub fn into_intervals(self) -> Vec<BusyInterval> {
        match self {
            BusyLookup::Available(intervals) => intervals,
            BusyLookup::Unavailable(_) => Vec::new(),
        }
    }
}
