use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored scenario inputs of a project, task or user assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<f64>,
    /// Actual completion, set from outside once the work is marked done.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Forecast read model. Derived on every read and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub start_date: DateTime<Utc>,
    pub estimate: f64,
    pub target_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub worked_hours: f64,
    pub elapsed_hours: f64,
    pub projection: f64,
}

/// The part of a logged entry that counts towards worked hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoggedHours {
    pub date: DateTime<Utc>,
    pub hours: f64,
}
