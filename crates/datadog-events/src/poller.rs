// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_api_common::TimeWindow;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::EventsClient;
use crate::config::PollerConfig;
use crate::error::PollerError;
use crate::seen::SeenSet;
use crate::sink::EventSink;

/// Polls the events endpoint and forwards every new event to a sink.
pub struct EventPoller<S> {
    client: EventsClient,
    sink: S,
    seen: SeenSet,
    interval: Duration,
    lookback: Duration,
}

impl<S: EventSink> EventPoller<S> {
    pub fn new(client: EventsClient, sink: S, interval: Duration, lookback: Duration) -> Self {
        Self {
            client,
            sink,
            seen: SeenSet::new(),
            interval,
            lookback,
        }
    }

    pub fn from_config(config: &PollerConfig, http: Client, sink: S) -> Self {
        let client = EventsClient::new(http, config.api_url.clone(), config.credentials.clone());
        Self::new(client, sink, config.interval, config.lookback)
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    /// Runs one poll over the window ending now.
    pub async fn poll_once(&mut self) -> Result<usize, PollerError> {
        self.poll_window(TimeWindow::trailing(self.lookback)).await
    }

    /// Fetches `window` and forwards the events not seen before. Returns the
    /// number of events forwarded.
    ///
    /// Keys older than one lookback before `window.start` are evicted first;
    /// the endpoint never returns those events again.
    pub async fn poll_window(&mut self, window: TimeWindow) -> Result<usize, PollerError> {
        let cutoff = window.start.saturating_sub(self.lookback.as_secs());
        let evicted = self
            .seen
            .evict_before(i64::try_from(cutoff).unwrap_or(i64::MAX));
        if evicted > 0 {
            debug!("Evicted {evicted} event keys older than {cutoff}");
        }

        let events = self.client.fetch(window).await?;
        let received = events.len();

        let mut forwarded = 0;
        for event in events {
            if self.seen.insert(event.key()) {
                debug!("Forwarding event {} ({})", event.id, event.date_happened);
                self.sink.put(event).await?;
                forwarded += 1;
            }
        }

        debug!(
            "Received {received} events, forwarded {forwarded}, tracking {} keys",
            self.seen.len()
        );
        Ok(forwarded)
    }

    /// Polls until `cancel` fires. Cancellation is observed both during a
    /// poll and during the pause between polls. Any poll error ends the loop.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), PollerError> {
        info!(
            "Polling {} every {}s with a {}s lookback",
            self.client.url(),
            self.interval.as_secs(),
            self.lookback.as_secs()
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.poll_once() => {
                    result?;
                }
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = sleep(self.interval) => {}
            }
        }

        info!("Event poller stopped");
        Ok(())
    }
}
