// Shared value conversions.
//
// Notes
// - Events and read model rows store instants as epoch milliseconds (i64).
// - Hours cross the domain as f64 and are turned into millisecond durations for calendar arithmetic.
// - Only instants from year 1 through year 9999 are accepted, so local calendar arithmetic
//   around them cannot overflow.

use chrono::{DateTime, Duration, Utc};

pub type EpochMillis = i64;

pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// 0001-01-01T00:00:00Z
pub const MIN_EPOCH_MILLIS: EpochMillis = -62_135_596_800_000;
/// 9999-12-31T23:59:59.999Z
pub const MAX_EPOCH_MILLIS: EpochMillis = 253_402_300_799_999;

pub fn is_supported_instant(at: DateTime<Utc>) -> bool {
    (MIN_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&at.timestamp_millis())
}

/// `None` outside the supported range.
pub fn from_epoch_millis(millis: EpochMillis) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis).filter(|at| is_supported_instant(*at))
}

pub fn to_epoch_millis(at: DateTime<Utc>) -> EpochMillis {
    at.timestamp_millis()
}

/// Rounds to the nearest millisecond.
pub fn hours_to_duration(hours: f64) -> Duration {
    Duration::milliseconds((hours * MILLIS_PER_HOUR as f64).round() as i64)
}

pub fn duration_to_hours(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / MILLIS_PER_HOUR as f64
}
