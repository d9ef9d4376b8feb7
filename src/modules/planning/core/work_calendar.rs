// Work calendar: working time arithmetic for one resolved schedule.
//
// Model
// - A local day (in the schedule's timezone) is a working day iff its weekday is active.
// - The work window of a working day is [endOfDay - workshift, endOfDay) local time,
//   clamped so it never starts before local midnight.
// - Excluded intervals (time off) are cut out of the windows.
//
// Boundaries
// - Pure computations over already loaded data. Walks and measured spans are capped by
//   max_walk_days.
// - Instants outside years 1..=9999 are rejected as invalid arguments.

use crate::modules::planning::core::errors::ForecastError;
use crate::modules::planning::core::scheduling::Scheduling;
use crate::modules::planning::core::time_off::{Interval, merge_intervals};
use crate::shared::core::primitives::{duration_to_hours, hours_to_duration, is_supported_instant};
use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Ten years and a bit of slack for leap days.
pub const DEFAULT_MAX_WALK_DAYS: u32 = 3660;

#[derive(Debug, Clone)]
pub struct WorkCalendar {
    schedule: Scheduling,
    exclusions: Vec<Interval>,
    max_walk_days: u32,
}

impl WorkCalendar {
    pub fn new(schedule: Scheduling) -> Result<Self, ForecastError> {
        schedule.validate()?;
        Ok(Self {
            schedule,
            exclusions: Vec::new(),
            max_walk_days: DEFAULT_MAX_WALK_DAYS,
        })
    }

    pub fn with_exclusions(mut self, exclusions: Vec<Interval>) -> Self {
        self.exclusions = merge_intervals(exclusions);
        self
    }

    pub fn with_max_walk_days(mut self, max_walk_days: u32) -> Self {
        self.max_walk_days = max_walk_days;
        self
    }

    /// Instants outside the supported range are never working time.
    pub fn is_working_instant(&self, at: DateTime<Utc>) -> bool {
        let Ok(date) = self.local_date(at) else {
            return false;
        };
        self.available(date)
            .iter()
            .any(|segment| segment.contains(at))
    }

    /// Moves `start` forward by `hours` of working time.
    pub fn add_working_hours(
        &self,
        start: DateTime<Utc>,
        hours: f64,
    ) -> Result<DateTime<Utc>, ForecastError> {
        let mut remaining = checked_hours(hours)?;
        if remaining.is_zero() {
            return Ok(start);
        }
        let mut date = self.local_date(start)?;
        for _ in 0..self.max_walk_days {
            for segment in self.available(date) {
                if segment.end <= start {
                    continue;
                }
                let from = segment.start.max(start);
                let span = segment.end - from;
                if span >= remaining {
                    return Ok(from + remaining);
                }
                remaining = remaining - span;
            }
            date = next_day(date)?;
        }
        Err(self.walk_exhausted(start, hours))
    }

    /// Moves `end` backward by `hours` of working time.
    pub fn sub_working_hours(
        &self,
        end: DateTime<Utc>,
        hours: f64,
    ) -> Result<DateTime<Utc>, ForecastError> {
        let mut remaining = checked_hours(hours)?;
        if remaining.is_zero() {
            return Ok(end);
        }
        let mut date = self.local_date(end)?;
        for _ in 0..self.max_walk_days {
            for segment in self.available(date).into_iter().rev() {
                if segment.start >= end {
                    continue;
                }
                let to = segment.end.min(end);
                let span = to - segment.start;
                if span >= remaining {
                    return Ok(to - remaining);
                }
                remaining = remaining - span;
            }
            date = date
                .pred_opt()
                .ok_or_else(|| ForecastError::Schedule("calendar underflow".into()))?;
        }
        Err(self.walk_exhausted(end, -hours))
    }

    /// Working hours in `[from, to)`. Reversed bounds give the negated amount.
    pub fn working_hours_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<f64, ForecastError> {
        if to < from {
            return Ok(-self.working_hours_between(to, from)?);
        }
        let mut date = self.local_date(from)?;
        let last = self.local_date(to)?;
        let span = last.signed_duration_since(date).num_days();
        if span >= i64::from(self.max_walk_days) {
            tracing::warn!(
                %from,
                %to,
                max_walk_days = self.max_walk_days,
                "working time span too long to measure"
            );
            return Err(ForecastError::Schedule(format!(
                "cannot measure working hours from {from} to {to}: the span exceeds {} days",
                self.max_walk_days
            )));
        }
        let mut total = Duration::zero();
        while date <= last {
            for segment in self.available(date) {
                let overlap = Interval::new(segment.start.max(from), segment.end.min(to));
                total = total + overlap.duration();
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        Ok(duration_to_hours(total))
    }

    fn local_date(&self, at: DateTime<Utc>) -> Result<NaiveDate, ForecastError> {
        let out_of_range =
            || ForecastError::invalid(format!("instant {at} is outside the supported range"));
        if !is_supported_instant(at) {
            return Err(out_of_range());
        }
        let utc = at.naive_utc();
        let offset = self.schedule.timezone.offset_from_utc_datetime(&utc).fix();
        utc.checked_add_offset(offset)
            .map(|local| local.date())
            .ok_or_else(out_of_range)
    }

    fn window(&self, date: NaiveDate) -> Option<Interval> {
        if !self.schedule.weekdays.contains(date.weekday()) {
            return None;
        }
        let midnight = date.and_time(NaiveTime::MIN);
        let end_local = midnight.checked_add_signed(self.schedule.end_of_day_offset())?;
        let start_local = end_local
            .checked_sub_signed(self.schedule.workshift_duration())?
            .max(midnight);
        let window = Interval::new(
            localize(&self.schedule.timezone, start_local),
            localize(&self.schedule.timezone, end_local),
        );
        (!window.is_empty()).then_some(window)
    }

    /// The window of `date` minus every exclusion, in chronological order.
    fn available(&self, date: NaiveDate) -> Vec<Interval> {
        let Some(window) = self.window(date) else {
            return Vec::new();
        };
        let mut segments = vec![window];
        for exclusion in &self.exclusions {
            if exclusion.end <= window.start {
                continue;
            }
            if exclusion.start >= window.end {
                break;
            }
            segments = segments
                .iter()
                .flat_map(|segment| segment.subtract(exclusion))
                .collect();
        }
        segments
    }

    fn walk_exhausted(&self, from: DateTime<Utc>, hours: f64) -> ForecastError {
        tracing::warn!(
            %from,
            hours,
            max_walk_days = self.max_walk_days,
            "work calendar walk did not terminate"
        );
        ForecastError::Schedule(format!(
            "could not place {hours} working hours from {from} within {} days",
            self.max_walk_days
        ))
    }
}

fn checked_hours(hours: f64) -> Result<Duration, ForecastError> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(ForecastError::invalid(format!(
            "hours must be a non-negative number, got {hours}"
        )));
    }
    Ok(hours_to_duration(hours))
}

fn next_day(date: NaiveDate) -> Result<NaiveDate, ForecastError> {
    date.succ_opt()
        .ok_or_else(|| ForecastError::Schedule("calendar overflow".into()))
}

/// Local wall time to UTC. Ambiguous times take the earlier instant, times skipped by a
/// DST gap are read with the offset in force before the gap.
fn localize(timezone: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    if let Some(at) = timezone.from_local_datetime(&local).earliest() {
        return at.with_timezone(&Utc);
    }
    let before_gap = local
        .checked_sub_signed(Duration::hours(1))
        .and_then(|before_gap| timezone.from_local_datetime(&before_gap).earliest());
    match before_gap {
        Some(at) => at.with_timezone(&Utc) + Duration::hours(1),
        None => Utc.from_utc_datetime(&local),
    }
}
