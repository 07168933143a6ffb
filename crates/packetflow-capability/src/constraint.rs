use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time window `[start, end)` a capability is valid within:
/// `valid_at` checks `start <= t < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

/// A named recurring temporal pattern a capability's validity can be
/// gated on, in addition to (or instead of) an explicit [`TimeWindow`].
/// Named patterns are resolved by `packetflow-temporal`'s evaluator;
/// this crate only carries the declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemporalPattern {
    BusinessHours,
    Weekdays,
}
