// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Failure of a single query. Any of these aborts the whole batch.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("request for '{query}' failed: {source}")]
    Transport {
        query: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for '{query}' returned {status}: {body}")]
    Status {
        query: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response for '{query}': {source}")]
    Decode {
        query: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Problems with the arguments handed over by the automation host
#[derive(Debug, thiserror::Error)]
pub enum ArgsError {
    #[error("unable to read arguments file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse arguments: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    Invalid(String),
}
