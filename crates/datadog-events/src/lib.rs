// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Datadog event source.
//!
//! [`poller::EventPoller`] queries the v1 events API over a trailing window on
//! a fixed interval and hands every event it has not seen before to an
//! [`sink::EventSink`]. The lookback window is wider than the interval because
//! events can take minutes to show up in the stream, so consecutive polls
//! overlap and [`seen::SeenSet`] removes the duplicates.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod poller;
pub mod seen;
pub mod sink;

pub use client::EventsClient;
pub use config::PollerConfig;
pub use error::{ConfigError, PollerError, SinkError};
pub use event::{Event, EventId, EventKey};
pub use poller::EventPoller;
pub use seen::SeenSet;
pub use sink::{EventSink, JsonLinesSink};
