// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Building blocks shared by the Datadog event poller and metric fetcher.
//!
//! Nothing here talks to a specific Datadog endpoint. The crate only knows how
//! to build an HTTP client, hold API credentials, compute trailing time
//! windows, and install the log subscriber used by the binaries.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod client;
pub mod credentials;
pub mod logging;
pub mod window;

pub use client::{build_client, ClientError, ClientOptions};
pub use credentials::Credentials;
pub use window::TimeWindow;
