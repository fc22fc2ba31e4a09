// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Ansible binary module contract.
//!
//! The host writes the task arguments as a JSON object to a file and passes
//! its path as the first command line argument. The module answers with a
//! single JSON object on stdout, either
//! `{"changed": false, "metrics_data": {...}}` or
//! `{"failed": true, "msg": "..."}`.

use datadog_api_common::Credentials;
use reqwest::Client;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::ArgsError;
use crate::fetcher::{MetricFetcher, DEFAULT_DURATION_SECS, DEFAULT_QUERY_URL};
use crate::metric::MetricsData;

/// Task arguments. Keys the module does not know about, such as the
/// `_ansible_*` internals, are ignored.
///
/// Like the host's own `int` and `list` argument types, `duration_seconds`
/// also accepts a numeric string and `queries` also accepts a single
/// comma-separated string. Queries that contain a comma must be passed as a
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModuleArgs {
    pub api_key: String,
    pub app_key: String,
    #[serde(
        default = "default_duration_seconds",
        deserialize_with = "deserialize_seconds"
    )]
    pub duration_seconds: u64,
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    #[serde(deserialize_with = "deserialize_queries")]
    pub queries: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SecondsArg {
    Number(u64),
    Text(String),
}

fn deserialize_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match SecondsArg::deserialize(deserializer)? {
        SecondsArg::Number(secs) => Ok(secs),
        SecondsArg::Text(raw) => raw.trim().parse::<u64>().map_err(|_| {
            D::Error::custom(format!(
                "duration_seconds must be a whole number of seconds, got '{raw}'"
            ))
        }),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QueriesArg {
    List(Vec<String>),
    Text(String),
}

fn deserialize_queries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    Ok(match QueriesArg::deserialize(deserializer)? {
        QueriesArg::List(queries) => queries,
        QueriesArg::Text(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

fn default_duration_seconds() -> u64 {
    DEFAULT_DURATION_SECS
}

fn default_endpoint_url() -> String {
    DEFAULT_QUERY_URL.to_string()
}

impl ModuleArgs {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArgsError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ArgsError> {
        let args: Self = serde_json::from_str(raw)?;
        args.validate()?;
        Ok(args)
    }

    pub fn validate(&self) -> Result<(), ArgsError> {
        if self.api_key.trim().is_empty() {
            return Err(ArgsError::Invalid("api_key must not be empty".to_string()));
        }
        if self.app_key.trim().is_empty() {
            return Err(ArgsError::Invalid("app_key must not be empty".to_string()));
        }
        if !self.endpoint_url.starts_with("http://") && !self.endpoint_url.starts_with("https://")
        {
            return Err(ArgsError::Invalid(format!(
                "endpoint_url '{}' must start with http:// or https://",
                self.endpoint_url
            )));
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone(), self.app_key.clone())
    }
}

/// What the module reports back to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleOutcome {
    Success {
        changed: bool,
        metrics_data: MetricsData,
    },
    Failure {
        failed: bool,
        msg: String,
    },
}

impl ModuleOutcome {
    pub fn success(metrics_data: MetricsData) -> Self {
        Self::Success {
            changed: false,
            metrics_data,
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self::Failure {
            failed: true,
            msg: msg.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

/// Runs every query of `args` and folds the result into a [`ModuleOutcome`].
pub async fn run_module(args: &ModuleArgs, client: Client) -> ModuleOutcome {
    let fetcher = MetricFetcher::new(
        client,
        args.endpoint_url.clone(),
        args.credentials(),
        Duration::from_secs(args.duration_seconds),
    );
    debug!(
        "Fetching {} queries from {} over the last {}s",
        args.queries.len(),
        args.endpoint_url,
        args.duration_seconds
    );

    match fetcher.fetch_all(&args.queries).await {
        Ok(metrics_data) => ModuleOutcome::success(metrics_data),
        Err(e) => {
            error!("An error occurred: {e}");
            ModuleOutcome::failure(e.to_string())
        }
    }
}
