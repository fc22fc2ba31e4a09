// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Log subscriber setup for the binaries.
//!
//! stdout is reserved for data (event lines, module results), so everything
//! logged goes to stderr.

use std::env;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// `DD_LOG_LEVEL`, lowercased, or `info` when unset.
pub fn log_level_from_env() -> String {
    env::var("DD_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
}

/// Filter directive for `log_level` with the noisy HTTP stack silenced.
pub fn env_filter_directive(log_level: &str) -> String {
    format!("h2=off,hyper=off,hyper_util=off,rustls=off,{log_level}")
}

/// Filter for `log_level`, or for [`DEFAULT_LOG_LEVEL`] when `log_level` is
/// not a valid directive. The flag is `true` when the fallback was used.
pub fn env_filter_or_default(log_level: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(env_filter_directive(log_level)) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new(env_filter_directive(DEFAULT_LOG_LEVEL)), true),
    }
}

/// Installs the global subscriber. An invalid `log_level` falls back to
/// `info` with a warning; only an already installed global subscriber is an
/// error.
pub fn init_or_default(log_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (filter, fell_back) = env_filter_or_default(log_level);
    install(filter)?;
    if fell_back {
        tracing::warn!("Invalid log level '{log_level}', using '{DEFAULT_LOG_LEVEL}'");
    }
    Ok(())
}

fn install(filter: EnvFilter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
