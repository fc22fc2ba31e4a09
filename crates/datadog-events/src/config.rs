// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_api_common::Credentials;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_EVENTS_URL: &str = "https://api.datadoghq.com/api/v1/events";
pub const DEFAULT_INTERVAL_SECS: u64 = 10;
/// Events can take a few minutes to reach the stream.
pub const DEFAULT_LOOKBACK_SECS: u64 = 300;

/// Configuration for the event poller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub credentials: Credentials,
    /// Full URL of the events endpoint
    pub api_url: String,
    /// Pause between two polls
    pub interval: Duration,
    /// Width of the window queried on every poll
    pub lookback: Duration,
}

impl PollerConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: DEFAULT_EVENTS_URL.to_string(),
            interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            lookback: Duration::from_secs(DEFAULT_LOOKBACK_SECS),
        }
    }

    /// Reads the configuration from environment variables.
    ///
    /// `DATADOG_API_KEY` and `DATADOG_APP_KEY` are required (`DD_API_KEY` and
    /// `DD_APP_KEY` are accepted as fallbacks). `DATADOG_API_URL`, `INTERVAL`
    /// and `DD_EVENTS_LOOKBACK_SECONDS` are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`PollerConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|val| !val.trim().is_empty());

        let api_key = non_empty("DATADOG_API_KEY")
            .or_else(|| non_empty("DD_API_KEY"))
            .ok_or(ConfigError::Missing("DATADOG_API_KEY"))?;
        let app_key = non_empty("DATADOG_APP_KEY")
            .or_else(|| non_empty("DD_APP_KEY"))
            .ok_or(ConfigError::Missing("DATADOG_APP_KEY"))?;

        let mut config = Self::new(Credentials::new(api_key, app_key));

        if let Some(url) = non_empty("DATADOG_API_URL") {
            config.api_url = url.trim().to_string();
        }
        if let Some(interval) = non_empty("INTERVAL") {
            config.interval = Duration::from_secs(parse_secs("INTERVAL", &interval)?);
        }
        if let Some(lookback) = non_empty("DD_EVENTS_LOOKBACK_SECONDS") {
            config.lookback =
                Duration::from_secs(parse_secs("DD_EVENTS_LOOKBACK_SECONDS", &lookback)?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::Invalid(
                "polling interval must be greater than 0".to_string(),
            ));
        }
        if self.lookback.as_secs() == 0 {
            return Err(ConfigError::Invalid(
                "lookback must be at least one second".to_string(),
            ));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "events URL '{}' must start with http:// or https://",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse::<u64>().map_err(|_| {
        ConfigError::Invalid(format!(
            "{name} must be a whole number of seconds, got '{raw}'"
        ))
    })
}
