// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Reported in place of a value when the window holds no points.
pub const NO_DATA_MESSAGE: &str = "No data available for the specified time range.";

/// Latest sample of a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Value(f64),
    NoData,
}

impl MetricValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            Self::NoData => None,
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => serializer.serialize_f64(*value),
            Self::NoData => serializer.serialize_str(NO_DATA_MESSAGE),
        }
    }
}

/// Sanitised query name to latest sample.
pub type MetricsData = BTreeMap<String, MetricValue>;

/// Relevant subset of the `GET /api/v1/query` response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct QueryResponse {
    #[serde(default)]
    series: Option<Vec<Series>>,
}

#[derive(Debug, Deserialize)]
struct Series {
    /// `[timestamp_ms, value]` pairs, oldest first. `value` may be null.
    #[serde(default)]
    pointlist: Option<Vec<Vec<Option<f64>>>>,
}

impl QueryResponse {
    /// Value of the last point of the first series.
    pub(crate) fn latest_value(&self) -> MetricValue {
        self.series
            .as_ref()
            .and_then(|series| series.first())
            .and_then(|series| series.pointlist.as_ref())
            .and_then(|points| points.last())
            .and_then(|point| point.get(1).copied().flatten())
            .map_or(MetricValue::NoData, MetricValue::Value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn latest(body: serde_json::Value) -> MetricValue {
        serde_json::from_value::<QueryResponse>(body)
            .unwrap()
            .latest_value()
    }

    #[test]
    fn test_latest_value_takes_last_point() {
        let value = latest(json!({
            "status": "ok",
            "series": [{
                "metric": "system.cpu.idle",
                "pointlist": [[1_700_000_000_000.0, 12.5], [1_700_000_060_000.0, 42.0]],
            }],
        }));
        assert_eq!(value, MetricValue::Value(42.0));
    }

    #[test]
    fn test_only_first_series_is_used() {
        let value = latest(json!({
            "series": [
                {"pointlist": [[1.0, 1.0]]},
                {"pointlist": [[1.0, 2.0]]},
            ],
        }));
        assert_eq!(value, MetricValue::Value(1.0));
    }

    #[test]
    fn test_no_data_cases() {
        assert_eq!(latest(json!({"series": []})), MetricValue::NoData);
        assert_eq!(latest(json!({})), MetricValue::NoData);
        assert_eq!(latest(json!({"series": null})), MetricValue::NoData);
        assert_eq!(latest(json!({"series": [{"pointlist": []}]})), MetricValue::NoData);
        assert_eq!(latest(json!({"series": [{}]})), MetricValue::NoData);
        assert_eq!(
            latest(json!({"series": [{"pointlist": [[1.0, 3.0], [2.0, null]]}]})),
            MetricValue::NoData
        );
    }

    #[test]
    fn test_serialize() {
        let mut data = MetricsData::new();
        data.insert("avg_system_cpu_idle".to_string(), MetricValue::Value(42.0));
        data.insert("avg_system_mem_used".to_string(), MetricValue::NoData);
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "avg_system_cpu_idle": 42.0,
                "avg_system_mem_used": NO_DATA_MESSAGE,
            })
        );
    }
}
