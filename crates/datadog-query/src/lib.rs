// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! One-shot Datadog metric lookups.
//!
//! For each query, [`fetcher::MetricFetcher`] asks the v1 query API for the
//! trailing window and keeps the last point of the first series. Results are
//! keyed by a sanitised form of the query so they can be used as field names
//! by the automation host. [`module`] wraps this in the JSON-in/JSON-out
//! contract of an Ansible binary module.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod error;
pub mod fetcher;
pub mod metric;
pub mod module;
pub mod sanitize;

pub use error::{ArgsError, QueryError};
pub use fetcher::MetricFetcher;
pub use metric::{MetricValue, MetricsData, NO_DATA_MESSAGE};
pub use module::{run_module, ModuleArgs, ModuleOutcome};
pub use sanitize::sanitize_query;
