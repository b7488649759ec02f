//! Configuration loaded from the environment
//!
//! The process takes no CLI flags: one run is one housekeeping pass.
//! Required variables are validated before any network activity so a
//! misconfigured cron job fails fast with a clear message.

use thiserror::Error;

/// Default whole-pound budget per monthly section
pub const DEFAULT_MONTHLY_BUDGET: u32 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),

    #[error("MONTHLY_BUDGET is not a whole number of pounds: '{0}'")]
    InvalidBudget(String),
}

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Todoist API bearer token (`TODOIST_TOKEN`)
    pub api_token: String,

    /// Target project id (`TODOIST_PROJECT_ID`)
    pub project_id: String,

    /// Whole-pound budget per monthly section (`MONTHLY_BUDGET`,
    /// defaults to 500)
    pub monthly_budget: u32,
}

impl Config {
    /// Load and validate configuration from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_token = require(&get, "TODOIST_TOKEN")?;
        let project_id = require(&get, "TODOIST_PROJECT_ID")?;

        let monthly_budget = match get("MONTHLY_BUDGET") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidBudget(raw))?,
            None => DEFAULT_MONTHLY_BUDGET,
        };

        Ok(Self {
            api_token,
            project_id,
            monthly_budget,
        })
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}
