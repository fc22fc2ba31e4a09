// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::event::EventKey;
use std::collections::BTreeSet;

/// Keys of events already forwarded by the poller.
///
/// Entries are dropped once their `date_happened` falls behind the cutoff the
/// poller passes to [`SeenSet::evict_before`], so memory stays proportional
/// to the number of events inside the lookback window.
#[derive(Debug, Default)]
pub struct SeenSet {
    keys: BTreeSet<EventKey>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`. Returns `true` if it was not seen before.
    pub fn insert(&mut self, key: EventKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &EventKey) -> bool {
        self.keys.contains(key)
    }

    /// Drops every key with `date_happened < cutoff` and returns how many
    /// were removed.
    pub fn evict_before(&mut self, cutoff: i64) -> usize {
        let before = self.keys.len();
        self.keys = self.keys.split_off(&EventKey::lower_bound(cutoff));
        before - self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;

    fn key(id: u64, date_happened: i64) -> EventKey {
        EventKey {
            date_happened,
            id: EventId::Number(id),
        }
    }

    #[test]
    fn test_insert_reports_new_keys_once() {
        let mut seen = SeenSet::new();
        assert!(seen.insert(key(1, 100)));
        assert!(!seen.insert(key(1, 100)));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_same_id_new_date_is_distinct() {
        let mut seen = SeenSet::new();
        assert!(seen.insert(key(1, 100)));
        assert!(seen.insert(key(1, 160)));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_evict_before_keeps_cutoff_and_newer() {
        let mut seen = SeenSet::new();
        seen.insert(key(1, 90));
        seen.insert(key(2, 99));
        seen.insert(key(3, 100));
        seen.insert(key(4, 150));
        seen.insert(EventKey {
            date_happened: 100,
            id: EventId::Text("a".to_string()),
        });

        assert_eq!(seen.evict_before(100), 2);
        assert_eq!(seen.len(), 3);
        assert!(!seen.contains(&key(1, 90)));
        assert!(!seen.contains(&key(2, 99)));
        assert!(seen.contains(&key(3, 100)));
        assert!(seen.contains(&key(4, 150)));
    }

    #[test]
    fn test_evict_on_empty_set() {
        let mut seen = SeenSet::new();
        assert_eq!(seen.evict_before(i64::MAX), 0);
        assert!(seen.is_empty());
    }
}
