// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_api_common::{Credentials, TimeWindow};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::PollerError;
use crate::event::{Event, EventsResponse};

/// Client for `GET /api/v1/events`.
///
/// The events endpoint takes the credentials as query parameters rather than
/// headers.
#[derive(Debug, Clone)]
pub struct EventsClient {
    client: Client,
    url: String,
    credentials: Credentials,
}

impl EventsClient {
    pub fn new(client: Client, url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            client,
            url: url.into(),
            credentials,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the events that happened inside `window`.
    ///
    /// The status code is only logged: whatever body comes back is decoded,
    /// and a body without `events` (an error payload, for instance) yields an
    /// empty list.
    pub async fn fetch(&self, window: TimeWindow) -> Result<Vec<Event>, PollerError> {
        let start = window.start.to_string();
        let end = window.end.to_string();
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("api_key", self.credentials.api_key.as_str()),
                ("application_key", self.credentials.app_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!("HTTP Status Code: {status}");
        if !status.is_success() {
            warn!("Events endpoint answered {status} for window {start}..{end}");
        }

        let body = response.bytes().await?;
        let parsed: EventsResponse = serde_json::from_slice(&body)?;
        Ok(parsed.events.unwrap_or_default())
    }
}
