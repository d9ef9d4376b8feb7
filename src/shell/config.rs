// Runtime configuration read from the environment.
//
// Variables
// - WORK_FORECAST_BIND_ADDR: socket address of the GraphQL server (default 0.0.0.0:8080).
// - WORK_FORECAST_DIRECTORY_PATH: JSON seed of the directory; empty directory when unset.
// - WORK_FORECAST_MAX_WALK_DAYS: day cap of the calendar walk (default 3660).

use crate::modules::planning::core::work_calendar::DEFAULT_MAX_WALK_DAYS;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "WORK_FORECAST_BIND_ADDR";
pub const DIRECTORY_PATH_VAR: &str = "WORK_FORECAST_DIRECTORY_PATH";
pub const MAX_WALK_DAYS_VAR: &str = "WORK_FORECAST_MAX_WALK_DAYS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub directory_path: Option<PathBuf>,
    pub max_walk_days: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_addr = value(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: BIND_ADDR_VAR,
                reason: e.to_string(),
            })?;
        let max_walk_days = match value(MAX_WALK_DAYS_VAR) {
            None => DEFAULT_MAX_WALK_DAYS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: MAX_WALK_DAYS_VAR,
                        reason: format!("expected a positive number of days, got `{raw}`"),
                    });
                }
            },
        };

        Ok(Self {
            bind_addr,
            directory_path: value(DIRECTORY_PATH_VAR).map(PathBuf::from),
            max_walk_days,
        })
    }
}
