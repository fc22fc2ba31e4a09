// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Trailing time windows expressed in Unix seconds, the unit both the events
//! and the query endpoints expect.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A closed `[start, end]` interval in Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: u64,
    pub end: u64,
}

impl TimeWindow {
    /// Window of length `lookback` ending now.
    pub fn trailing(lookback: Duration) -> Self {
        Self::ending_at(now_unix_secs(), lookback)
    }

    /// Window of length `lookback` ending at `end`. Saturates at the epoch.
    pub fn ending_at(end: u64, lookback: Duration) -> Self {
        Self {
            start: end.saturating_sub(lookback.as_secs()),
            end,
        }
    }

    /// Zero for a hand-built window whose `start` is after its `end`.
    pub fn len(&self) -> Duration {
        Duration::from_secs(self.end.saturating_sub(self.start))
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Current wall clock time in whole seconds since the epoch.
///
/// A clock set before 1970 is reported as the epoch itself.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
