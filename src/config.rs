//! Tracker configuration
//!
//! Defaults come from `constants`; a handful of environment variables can
//! override them at startup.

use crate::{
    constants::{
        DEFAULT_ENDPOINT_URL, DEFAULT_TICKER, ENV_ENDPOINT, ENV_REFRESH_MS, ENV_TICKER,
        REFRESH_INTERVAL_MS,
    },
    error::ConfigError,
};
use std::time::Duration;

/// Settings fixed at controller construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Price endpoint to poll
    pub endpoint_url: String,
    /// Period of the refresh timer; never zero
    refresh_interval: Duration,
    /// Ticker appended to the circulating supply
    pub ticker: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            refresh_interval: Duration::from_millis(REFRESH_INTERVAL_MS),
            ticker: DEFAULT_TICKER.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Builds a config from the process environment
    ///
    /// Reads `PRICE_TRACKER_ENDPOINT`, `PRICE_TRACKER_REFRESH_MS` and
    /// `PRICE_TRACKER_TICKER`; unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_ENDPOINT) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: ENV_ENDPOINT,
                    value: url.to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            config.endpoint_url = url.to_string();
        }

        if let Some(raw) = lookup(ENV_REFRESH_MS) {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_REFRESH_MS,
                    value: raw.clone(),
                    reason: "expected a positive number of milliseconds".to_string(),
                })?;
            config.refresh_interval = Duration::from_millis(millis);
        }

        if let Some(ticker) = lookup(ENV_TICKER) {
            let ticker = ticker.trim();
            if !ticker.is_empty() {
                config.ticker = ticker.to_uppercase();
            }
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = endpoint_url.into();
        self
    }

    /// Sets the refresh period; a zero period is rejected
    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Result<Self, ConfigError> {
        if refresh_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "refresh_interval",
                value: format!("{:?}", refresh_interval),
                reason: "must be greater than zero".to_string(),
            });
        }
        self.refresh_interval = refresh_interval;
        Ok(self)
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.ticker = ticker.into();
        self
    }
}
