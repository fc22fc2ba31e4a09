// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Stand-alone event source: polls Datadog and prints each new event as a
//! line of JSON on stdout until interrupted.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::process::ExitCode;

use datadog_api_common::{build_client, logging, ClientOptions};
use datadog_events::{EventPoller, JsonLinesSink, PollerConfig};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[tokio::main]
pub async fn main() -> ExitCode {
    let log_level = logging::log_level_from_env();
    if let Err(e) = logging::init_or_default(&log_level) {
        eprintln!("unable to set up logging: {e}");
    }

    debug!("Logging subsystem enabled");

    let config = match PollerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Error creating event poller config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let http = match build_client(&ClientOptions::from_env().with_user_agent(USER_AGENT)) {
        Ok(client) => client,
        Err(e) => {
            error!("Error creating HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, shutting down");
                signal_token.cancel();
            }
            Err(e) => error!("Unable to listen for interrupt signal: {e}"),
        }
    });

    let sink = JsonLinesSink::new(tokio::io::stdout());
    let mut poller = EventPoller::from_config(&config, http, sink);
    match poller.run(cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Event poller failed: {e}");
            ExitCode::FAILURE
        }
    }
}
