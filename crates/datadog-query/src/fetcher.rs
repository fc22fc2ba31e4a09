// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_api_common::{Credentials, TimeWindow};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::error::QueryError;
use crate::metric::{MetricValue, MetricsData, QueryResponse};
use crate::sanitize::sanitize_query;

pub const DEFAULT_QUERY_URL: &str = "https://api.datadoghq.com/api/v1/query";
pub const DEFAULT_DURATION_SECS: u64 = 600;

/// Client for `GET /api/v1/query`. Credentials travel as headers.
#[derive(Debug, Clone)]
pub struct MetricFetcher {
    client: Client,
    endpoint_url: String,
    credentials: Credentials,
    duration: Duration,
}

impl MetricFetcher {
    pub fn new(
        client: Client,
        endpoint_url: impl Into<String>,
        credentials: Credentials,
        duration: Duration,
    ) -> Self {
        Self {
            client,
            endpoint_url: endpoint_url.into(),
            credentials,
            duration,
        }
    }

    /// Latest value of `query` over the trailing window.
    pub async fn fetch_latest(&self, query: &str) -> Result<MetricValue, QueryError> {
        self.fetch_latest_in(query, TimeWindow::trailing(self.duration))
            .await
    }

    /// Latest value of `query` inside `window`.
    pub async fn fetch_latest_in(
        &self,
        query: &str,
        window: TimeWindow,
    ) -> Result<MetricValue, QueryError> {
        let from = window.start.to_string();
        let to = window.end.to_string();
        let transport = |source| QueryError::Transport {
            query: query.to_string(),
            source,
        };

        let response = self
            .client
            .get(&self.endpoint_url)
            .header("DD-API-KEY", &self.credentials.api_key)
            .header("DD-APPLICATION-KEY", &self.credentials.app_key)
            .query(&[("from", from.as_str()), ("to", to.as_str()), ("query", query)])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if status != StatusCode::OK {
            error!("Received {status} status code for '{query}'. Response content: {body}");
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(QueryError::Status {
                query: query.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: QueryResponse =
            serde_json::from_str(&body).map_err(|source| QueryError::Decode {
                query: query.to_string(),
                source,
            })?;
        let value = parsed.latest_value();
        debug!("Latest value for '{query}' over {from}..{to}: {value:?}");
        Ok(value)
    }

    /// Fetches every query in order and keys the results by
    /// [`sanitize_query`]. The first failing query fails the batch and no
    /// partial results are returned. When two queries share a key the later
    /// one wins.
    pub async fn fetch_all<I, Q>(&self, queries: I) -> Result<MetricsData, QueryError>
    where
        I: IntoIterator<Item = Q>,
        Q: AsRef<str>,
    {
        let mut data = MetricsData::new();
        for query in queries {
            let query = query.as_ref();
            let value = self.fetch_latest(query).await?;
            let key = sanitize_query(query);
            if data.insert(key.clone(), value).is_some() {
                warn!(
                    "Query '{query}' maps to '{key}' like an earlier query; keeping the later value"
                );
            }
        }
        Ok(data)
    }
}
