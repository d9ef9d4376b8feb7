// Weekly work pattern of an organization, project, task or user assignment.
//
// Structure
// - Weekdays: compact set of active weekdays, serialized as weekday names ("Mon", "Tue", ...).
// - SchedulingOverrides: what an entity stores. Every field is optional and unset fields
//   are inherited from the nearest ancestor (see schedule_resolver.rs).
// - Scheduling: a fully resolved and validated pattern, the input of the work calendar.

use crate::modules::planning::core::errors::ForecastError;
use crate::shared::core::primitives::hours_to_duration;
use chrono::{Duration, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Weekdays(u8);

impl Weekdays {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn monday_to_friday() -> Self {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ]
        .into_iter()
        .collect()
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Sunday first.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        ALL_WEEKDAYS.into_iter().filter(move |day| self.contains(*day))
    }
}

fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_sunday()
}

impl FromIterator<Weekday> for Weekdays {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut weekdays = Weekdays::empty();
        for day in iter {
            weekdays.insert(day);
        }
        weekdays
    }
}

impl TryFrom<Vec<String>> for Weekdays {
    type Error = ForecastError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        names
            .iter()
            .map(|name| {
                name.parse::<Weekday>()
                    .map_err(|_| ForecastError::invalid(format!("unknown weekday `{name}`")))
            })
            .collect()
    }
}

impl From<Weekdays> for Vec<String> {
    fn from(weekdays: Weekdays) -> Self {
        weekdays.iter().map(|day| day.to_string()).collect()
    }
}

impl fmt::Debug for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workshift: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekdays: Option<Weekdays>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_day_hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_of_day_min: Option<u32>,
}

impl SchedulingOverrides {
    pub fn is_empty(&self) -> bool {
        self.workshift.is_none()
            && self.weekdays.is_none()
            && self.timezone.is_none()
            && self.end_of_day_hour.is_none()
            && self.end_of_day_min.is_none()
    }

    /// Field-wise merge: own values win, unset ones come from `fallback`.
    pub fn or(&self, fallback: &SchedulingOverrides) -> SchedulingOverrides {
        SchedulingOverrides {
            workshift: self.workshift.or(fallback.workshift),
            weekdays: self.weekdays.or(fallback.weekdays),
            timezone: self.timezone.clone().or_else(|| fallback.timezone.clone()),
            end_of_day_hour: self.end_of_day_hour.or(fallback.end_of_day_hour),
            end_of_day_min: self.end_of_day_min.or(fallback.end_of_day_min),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.workshift.is_none() {
            missing.push("workshift");
        }
        if self.weekdays.is_none() {
            missing.push("weekdays");
        }
        if self.timezone.is_none() {
            missing.push("timezone");
        }
        if self.end_of_day_hour.is_none() {
            missing.push("endOfDayHour");
        }
        if self.end_of_day_min.is_none() {
            missing.push("endOfDayMin");
        }
        missing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scheduling {
    pub workshift: f64,
    pub weekdays: Weekdays,
    pub timezone: Tz,
    pub end_of_day_hour: u32,
    pub end_of_day_min: u32,
}

impl Scheduling {
    pub fn new(
        workshift: f64,
        weekdays: Weekdays,
        timezone: &str,
        end_of_day_hour: u32,
        end_of_day_min: u32,
    ) -> Result<Self, ForecastError> {
        let scheduling = Self {
            workshift,
            weekdays,
            timezone: parse_timezone(timezone)?,
            end_of_day_hour,
            end_of_day_min,
        };
        scheduling.validate()?;
        Ok(scheduling)
    }

    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(0.0..=24.0).contains(&self.workshift) {
            return Err(ForecastError::invalid(format!(
                "workshift must be between 0 and 24 hours, got {}",
                self.workshift
            )));
        }
        if self.workshift > 0.0 && self.weekdays.is_empty() {
            return Err(ForecastError::invalid(
                "weekdays must not be empty when workshift is set",
            ));
        }
        if self.end_of_day_hour > 23 {
            return Err(ForecastError::invalid(format!(
                "endOfDayHour must be between 0 and 23, got {}",
                self.end_of_day_hour
            )));
        }
        if self.end_of_day_min > 59 {
            return Err(ForecastError::invalid(format!(
                "endOfDayMin must be between 0 and 59, got {}",
                self.end_of_day_min
            )));
        }
        Ok(())
    }

    /// Offset of the end-of-day cutoff from local midnight. A 00:00 cutoff closes the day
    /// at the following midnight.
    pub fn end_of_day_offset(&self) -> Duration {
        let offset =
            Duration::hours(self.end_of_day_hour as i64) + Duration::minutes(self.end_of_day_min as i64);
        if offset.is_zero() {
            Duration::hours(24)
        } else {
            offset
        }
    }

    pub fn workshift_duration(&self) -> Duration {
        hours_to_duration(self.workshift)
    }
}

impl TryFrom<&SchedulingOverrides> for Scheduling {
    type Error = ForecastError;

    fn try_from(overrides: &SchedulingOverrides) -> Result<Self, Self::Error> {
        match (
            overrides.workshift,
            overrides.weekdays,
            overrides.timezone.as_deref(),
            overrides.end_of_day_hour,
            overrides.end_of_day_min,
        ) {
            (Some(workshift), Some(weekdays), Some(timezone), Some(hour), Some(min)) => {
                Scheduling::new(workshift, weekdays, timezone, hour, min)
            }
            _ => Err(ForecastError::invalid(format!(
                "scheduling is incomplete, missing: {}",
                overrides.missing_fields().join(", ")
            ))),
        }
    }
}

impl From<&Scheduling> for SchedulingOverrides {
    fn from(scheduling: &Scheduling) -> Self {
        SchedulingOverrides {
            workshift: Some(scheduling.workshift),
            weekdays: Some(scheduling.weekdays),
            timezone: Some(scheduling.timezone.name().to_string()),
            end_of_day_hour: Some(scheduling.end_of_day_hour),
            end_of_day_min: Some(scheduling.end_of_day_min),
        }
    }
}

fn parse_timezone(timezone: &str) -> Result<Tz, ForecastError> {
    timezone
        .parse::<Tz>()
        .map_err(|_| ForecastError::invalid(format!("unknown timezone `{timezone}`")))
}
