// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! `datadog-query <args-file>`: fetches the latest value of each query and
//! prints the module result as JSON on stdout.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::env;
use std::process::ExitCode;

use datadog_api_common::{build_client, logging, ClientOptions};
use datadog_query::{run_module, ModuleArgs, ModuleOutcome};
use tracing::{debug, error};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[tokio::main]
pub async fn main() -> ExitCode {
    // stdout must carry the module result whatever happens to logging.
    let log_level = logging::log_level_from_env();
    if let Err(e) = logging::init_or_default(&log_level) {
        eprintln!("unable to set up logging: {e}");
    }

    let outcome = execute(env::args_os().nth(1)).await;
    let exit_code = if outcome.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    };

    match serde_json::to_string(&outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("Unable to encode module result: {e}");
            println!(r#"{{"failed": true, "msg": "unable to encode module result"}}"#);
            return ExitCode::FAILURE;
        }
    }
    exit_code
}

async fn execute(args_path: Option<std::ffi::OsString>) -> ModuleOutcome {
    let Some(args_path) = args_path else {
        return ModuleOutcome::failure("usage: datadog-query <arguments file>");
    };
    debug!("Reading module arguments from {:?}", args_path);

    let args = match ModuleArgs::from_file(&args_path) {
        Ok(args) => args,
        Err(e) => return ModuleOutcome::failure(e.to_string()),
    };

    let client = match build_client(&ClientOptions::from_env().with_user_agent(USER_AGENT)) {
        Ok(client) => client,
        Err(e) => return ModuleOutcome::failure(e.to_string()),
    };

    run_module(&args, client).await
}
