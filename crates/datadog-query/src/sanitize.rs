// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Turns a metric query into a field name: `:` and `.` become `_` and the
/// `{*}` scope is dropped.
///
/// ```
/// use datadog_query::sanitize_query;
///
/// assert_eq!(sanitize_query("avg:system.cpu.idle{*}"), "avg_system_cpu_idle");
/// ```
pub fn sanitize_query(query: &str) -> String {
    query.replace([':', '.'], "_").replace("{*}", "")
}
