use thiserror::Error;

/// Failures of the scheduling and forecast computations.
///
/// All of them are deterministic: retrying with the same input yields the same error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForecastError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("schedule error: {0}")]
    Schedule(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl ForecastError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
