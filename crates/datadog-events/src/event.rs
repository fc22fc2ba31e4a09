// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Event identifier as returned by the API. The v1 API sends a number, but
/// strings are accepted so that `id_str`-style payloads decode as well.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Number(u64),
    Text(String),
}

impl Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => write!(f, "{id}"),
        }
    }
}

/// A single entry of the event stream.
///
/// Only `id` and `date_happened` are interpreted. Every other field is kept
/// in `payload` and serialised back untouched when the event is forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Unix seconds
    pub date_happened: i64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Event {
    pub fn key(&self) -> EventKey {
        EventKey {
            date_happened: self.date_happened,
            id: self.id.clone(),
        }
    }
}

/// Identity of an event: the same id can be reported again with a new date.
///
/// Ordered by `date_happened` first so that old keys can be split off a
/// sorted set in one step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventKey {
    pub date_happened: i64,
    pub id: EventId,
}

impl EventKey {
    /// Smallest key with the given date.
    pub(crate) fn lower_bound(date_happened: i64) -> Self {
        Self {
            date_happened,
            id: EventId::Number(0),
        }
    }
}

/// Body of `GET /api/v1/events`. Error bodies have no `events` field and
/// decode to an empty list.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct EventsResponse {
    #[serde(default)]
    pub events: Option<Vec<Event>>,
}
