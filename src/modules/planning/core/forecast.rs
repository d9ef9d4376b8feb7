// Scenario computation for a single planned entity.
//
// Inputs are already resolved: the effective schedule, the time-off index of the whole
// hierarchy and the entries logged against the entity. Nothing here is cached; every read
// recomputes.

use crate::modules::planning::core::errors::ForecastError;
use crate::modules::planning::core::scenario::{LoggedHours, Scenario};
use crate::modules::planning::core::scheduling::Scheduling;
use crate::modules::planning::core::time_off::TimeOffTarget;
use crate::modules::planning::core::time_off_index::TimeOffIndex;
use crate::modules::planning::core::work_calendar::{DEFAULT_MAX_WALK_DAYS, WorkCalendar};
use chrono::{DateTime, Utc};

pub struct ScenarioRequest<'a> {
    pub start: DateTime<Utc>,
    pub estimate: f64,
    pub schedule: &'a Scheduling,
    pub time_off: &'a TimeOffIndex,
    /// Entity whose lineage decides which time off applies.
    pub target: TimeOffTarget,
    pub entries: &'a [LoggedHours],
    pub as_of: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ForecastEngine {
    max_walk_days: u32,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_WALK_DAYS)
    }
}

impl ForecastEngine {
    pub fn new(max_walk_days: u32) -> Self {
        Self { max_walk_days }
    }

    /// Calendar of `schedule` with the time off of `target` and its ancestors blocked out.
    pub fn calendar(
        &self,
        schedule: &Scheduling,
        time_off: &TimeOffIndex,
        target: TimeOffTarget,
    ) -> Result<WorkCalendar, ForecastError> {
        Ok(WorkCalendar::new(schedule.clone())?
            .with_exclusions(time_off.exclusions_for(target))
            .with_max_walk_days(self.max_walk_days))
    }

    pub fn compute_scenario(&self, request: ScenarioRequest<'_>) -> Result<Scenario, ForecastError> {
        if !request.estimate.is_finite() || request.estimate < 0.0 {
            return Err(ForecastError::invalid(format!(
                "estimate must be a non-negative number of hours, got {}",
                request.estimate
            )));
        }
        if let Some(entry) = request
            .entries
            .iter()
            .find(|entry| !entry.hours.is_finite() || entry.hours < 0.0)
        {
            return Err(ForecastError::invalid(format!(
                "logged hours must be non-negative, got {} on {}",
                entry.hours, entry.date
            )));
        }

        let calendar = self.calendar(request.schedule, request.time_off, request.target)?;
        let target_date = calendar.add_working_hours(request.start, request.estimate)?;
        let worked_hours: f64 = request
            .entries
            .iter()
            .filter(|entry| entry.date >= request.start)
            .map(|entry| entry.hours)
            .sum();
        let elapsed_hours = if request.as_of > request.start {
            calendar.working_hours_between(request.start, request.as_of)?
        } else {
            0.0
        };
        let projection = (request.estimate - worked_hours).max(0.0);

        Ok(Scenario {
            start_date: request.start,
            estimate: request.estimate,
            target_date,
            end_date: request.end_date,
            worked_hours,
            elapsed_hours,
            projection,
        })
    }
}
