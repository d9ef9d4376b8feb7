// Conversions from stored records into forecast inputs.

use crate::modules::planning::core::errors::ForecastError;
use crate::modules::planning::core::scenario::LoggedHours;
use crate::modules::work_log::use_cases::list_entries::projection::EntryView;
use crate::shared::core::primitives::from_epoch_millis;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub fn logged_hours<'a>(
    entries: impl IntoIterator<Item = &'a EntryView>,
) -> Result<Vec<LoggedHours>, ForecastError> {
    entries
        .into_iter()
        .map(|entry| {
            let date = from_epoch_millis(entry.date).ok_or_else(|| {
                ForecastError::invalid(format!(
                    "entry {} has an out of range date: {}",
                    entry.entry_id, entry.date
                ))
            })?;
            Ok(LoggedHours {
                date,
                hours: entry.hours,
            })
        })
        .collect()
}

pub fn required_start(
    start: Option<DateTime<Utc>>,
    entity: &'static str,
    id: impl std::fmt::Display,
) -> Result<DateTime<Utc>, ForecastError> {
    start.ok_or_else(|| ForecastError::invalid(format!("{entity} {id} has no start date")))
}

pub fn required_estimate(
    estimate: Option<f64>,
    entity: &'static str,
    id: impl std::fmt::Display,
) -> Result<f64, ForecastError> {
    estimate.ok_or_else(|| ForecastError::invalid(format!("{entity} {id} has no estimate")))
}

pub fn entity_not_found(entity: &'static str, id: Uuid) -> ForecastError {
    ForecastError::not_found(entity, id)
}
