// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use datadog_api_common::{Credentials, TimeWindow};
use datadog_query::{
    run_module, MetricFetcher, MetricValue, ModuleArgs, ModuleOutcome, QueryError,
    NO_DATA_MESSAGE,
};
use mockito::{Matcher, Server};
use reqwest::Client;
use std::time::Duration;

fn fetcher(server: &Server, duration: Duration) -> MetricFetcher {
    MetricFetcher::new(
        Client::new(),
        format!("{}/api/v1/query", server.url()),
        Credentials::new("mock-api-key", "mock-app-key"),
        duration,
    )
}

fn series_body(points: &str) -> String {
    format!(r#"{{"status": "ok", "series": [{{"metric": "system.cpu.idle", "pointlist": {points}}}]}}"#)
}

#[tokio::test]
async fn latest_point_is_returned() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/query")
        .match_header("DD-API-KEY", "mock-api-key")
        .match_header("DD-APPLICATION-KEY", "mock-app-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "1699999400".into()),
            Matcher::UrlEncoded("to".into(), "1700000000".into()),
            Matcher::UrlEncoded("query".into(), "avg:system.cpu.idle{*}".into()),
        ]))
        .with_status(200)
        .with_body(series_body("[[1699999940000.0, 12.0], [1700000000000.0, 42.0]]"))
        .create_async()
        .await;

    let value = fetcher(&server, Duration::from_secs(600))
        .fetch_latest_in(
            "avg:system.cpu.idle{*}",
            TimeWindow::ending_at(1_700_000_000, Duration::from_secs(600)),
        )
        .await
        .unwrap();

    assert_eq!(value, MetricValue::Value(42.0));
    mock.assert_async().await;
}

#[tokio::test]
async fn trailing_window_spans_duration() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::AllOf(vec![
            Matcher::Regex("from=[0-9]+".into()),
            Matcher::Regex("to=[0-9]+".into()),
        ]))
        .with_status(200)
        .with_body(series_body("[[1.0, 7.0]]"))
        .create_async()
        .await;

    let value = fetcher(&server, Duration::from_secs(600))
        .fetch_latest("avg:system.load.1{*}")
        .await
        .unwrap();

    assert_eq!(value.as_f64(), Some(7.0));
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_pointlist_is_no_data() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(series_body("[]"))
        .create_async()
        .await;

    let data = fetcher(&server, Duration::from_secs(600))
        .fetch_all(["avg:system.mem.used{*}"])
        .await
        .unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data["avg_system_mem_used"], MetricValue::NoData);
}

#[tokio::test]
async fn batch_is_keyed_by_sanitized_query() {
    let mut server = Server::new_async().await;
    let _cpu = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::UrlEncoded(
            "query".into(),
            "avg:system.cpu.idle{*}".into(),
        ))
        .with_status(200)
        .with_body(series_body("[[1.0, 99.5]]"))
        .create_async()
        .await;
    let _mem = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::UrlEncoded(
            "query".into(),
            "avg:system.mem.used{*}".into(),
        ))
        .with_status(200)
        .with_body(r#"{"status": "ok", "series": []}"#)
        .create_async()
        .await;

    let data = fetcher(&server, Duration::from_secs(600))
        .fetch_all(["avg:system.cpu.idle{*}", "avg:system.mem.used{*}"])
        .await
        .unwrap();

    assert_eq!(data["avg_system_cpu_idle"], MetricValue::Value(99.5));
    assert_eq!(data["avg_system_mem_used"], MetricValue::NoData);
}

#[tokio::test]
async fn one_failing_query_fails_the_batch() {
    let mut server = Server::new_async().await;
    let _ok = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::UrlEncoded("query".into(), "first".into()))
        .with_status(200)
        .with_body(series_body("[[1.0, 1.0]]"))
        .create_async()
        .await;
    let failing = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::UrlEncoded("query".into(), "second".into()))
        .with_status(403)
        .with_body(r#"{"errors": ["Forbidden"]}"#)
        .create_async()
        .await;
    let never = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::UrlEncoded("query".into(), "third".into()))
        .with_status(200)
        .with_body(series_body("[[1.0, 3.0]]"))
        .expect(0)
        .create_async()
        .await;

    let result = fetcher(&server, Duration::from_secs(600))
        .fetch_all(["first", "second", "third"])
        .await;

    match result {
        Err(QueryError::Status { query, status, body }) => {
            assert_eq!(query, "second");
            assert_eq!(status, 403);
            assert!(body.contains("Forbidden"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    failing.assert_async().await;
    never.assert_async().await;
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let result = fetcher(&server, Duration::from_secs(600))
        .fetch_latest("q")
        .await;
    assert!(matches!(result, Err(QueryError::Decode { .. })));
}

#[tokio::test]
async fn module_reports_metrics_data() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/query")
        .match_header("DD-API-KEY", "a")
        .match_header("DD-APPLICATION-KEY", "b")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(series_body("[[1.0, 42.0]]"))
        .create_async()
        .await;

    let args = ModuleArgs::from_json(&format!(
        r#"{{"api_key": "a", "app_key": "b", "duration_seconds": 600,
            "endpoint_url": "{}/api/v1/query", "queries": ["avg:system.cpu.idle{{*}}"]}}"#,
        server.url()
    ))
    .unwrap();

    let outcome = run_module(&args, Client::new()).await;
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        serde_json::json!({
            "changed": false,
            "metrics_data": {"avg_system_cpu_idle": 42.0},
        })
    );
}

#[tokio::test]
async fn module_reports_single_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/v1/query")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let args = ModuleArgs::from_json(&format!(
        r#"{{"api_key": "a", "app_key": "b", "endpoint_url": "{}/api/v1/query",
            "queries": ["avg:system.cpu.idle{{*}}", "avg:system.mem.used{{*}}"]}}"#,
        server.url()
    ))
    .unwrap();

    let outcome = run_module(&args, Client::new()).await;
    match outcome {
        ModuleOutcome::Failure { failed, msg } => {
            assert!(failed);
            assert!(msg.contains("500"));
            assert!(!msg.contains(NO_DATA_MESSAGE));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
