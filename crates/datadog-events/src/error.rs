// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Errors that end the polling loop
#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("failed to fetch events: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode events response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to forward event: {0}")]
    Sink(#[from] SinkError),
}

/// Errors raised by an [`EventSink`](crate::sink::EventSink)
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink is closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
