use crate::modules::planning::core::errors::ForecastError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastQueryError {
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error("unexpected: {0}")]
    Unexpected(String),
}

impl From<anyhow::Error> for ForecastQueryError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unexpected(error.to_string())
    }
}
