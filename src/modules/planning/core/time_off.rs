// Time-off records and the instant intervals they exclude from work calendars.

use crate::modules::planning::core::errors::ForecastError;
use crate::shared::core::primitives::hours_to_duration;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entity a time-off record is attached to. Time off cascades to everything beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id")]
pub enum TimeOffTarget {
    Organization(Uuid),
    Project(Uuid),
    Task(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOffKind {
    Vacation,
    Holiday,
    Sick,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOff {
    pub id: Uuid,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub days: u32,
    /// Trailing time past the last full day.
    #[serde(default)]
    pub extended_hours: f64,
    pub target: TimeOffTarget,
    #[serde(default)]
    pub kind: TimeOffKind,
}

impl TimeOff {
    pub fn interval(&self) -> Result<Interval, ForecastError> {
        if !self.extended_hours.is_finite() || self.extended_hours < 0.0 {
            return Err(ForecastError::invalid(format!(
                "time off {} has negative or non-finite extended hours",
                self.id
            )));
        }
        let end = self.start_date
            + Duration::days(self.days as i64)
            + hours_to_duration(self.extended_hours);
        Ok(Interval::new(self.start_date, end))
    }
}

/// Half-open `[start, end)` span of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration(&self) -> Duration {
        if self.is_empty() {
            Duration::zero()
        } else {
            self.end - self.start
        }
    }

    /// What remains of `self` once `other` is cut out: zero, one or two pieces.
    pub fn subtract(&self, other: &Interval) -> Vec<Interval> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        [
            Interval::new(self.start, other.start),
            Interval::new(other.end, self.end),
        ]
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .collect()
    }
}

/// Sorts and coalesces overlapping or touching intervals, dropping empty ones.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.retain(|interval| !interval.is_empty());
    intervals.sort_by_key(|interval| interval.start);
    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(last) if interval.start <= last.end => {
                last.end = last.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}
