//! Integration test: start the HTTP server and drive traces over the REST API.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use steptrace_core::ManualClock;
use steptrace_server::{start_server_with_state, AppState, AppStateInner, ServerConfig};

async fn spawn_server() -> (String, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
    ));
    let state: AppState = Arc::new(AppStateInner::with_clock(clock.clone()));

    let config = ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
    };
    let addr = start_server_with_state(config, state).await.unwrap();
    (format!("http://{}", addr), clock)
}

#[tokio::test]
async fn test_health_check() {
    let (base_url, _clock) = spawn_server().await;

    let resp = reqwest::get(format!("{}/api/health", base_url)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["live_traces"], 0);
}

#[tokio::test]
async fn test_build_trace_lifecycle() {
    let (base_url, clock) = spawn_server().await;
    let client = reqwest::Client::new();

    // ── start ───────────────────────────────────────────────────────
    let resp = client
        .post(format!("{}/api/tracing/start", base_url))
        .json(&serde_json::json!({ "tag": "build" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Trace started");
    assert_eq!(body["tag"], "build");
    assert!(body["trace_id"].is_null());
    assert_eq!(body["start_time"], "2024-01-01T12:00:00Z");

    // ── steps ───────────────────────────────────────────────────────
    clock.advance(Duration::seconds(2));
    let body: serde_json::Value = client
        .post(format!("{}/api/tracing/step", base_url))
        .json(&serde_json::json!({ "tag": "build", "step_name": "compile" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "Step added");
    assert_eq!(body["step_name"], "compile");
    assert_eq!(body["timestamp"], "2024-01-01T12:00:02Z");
    assert_eq!(body["duration"], 2.0);

    clock.advance(Duration::seconds(1));
    let body: serde_json::Value = client
        .post(format!("{}/api/tracing/step", base_url))
        .json(&serde_json::json!({ "tag": "build", "step_name": "link", "end": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["duration"], 1.0);

    // ── end ─────────────────────────────────────────────────────────
    clock.advance(Duration::seconds(2));
    let resp = client
        .post(format!("{}/api/tracing/end", base_url))
        .json(&serde_json::json!({ "tag": "build" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Trace ended");
    assert_eq!(body["start_time"], "2024-01-01T12:00:00Z");
    assert_eq!(body["end_time"], "2024-01-01T12:00:05Z");
    assert_eq!(body["duration"], 5.0);
    let steps = body["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0]["step_name"], "compile");
    assert_eq!(steps[0]["duration"], 2.0);
    assert_eq!(steps[1]["step_name"], "link");
    assert_eq!(steps[1]["timestamp"], "2024-01-01T12:00:03Z");

    // ── query ───────────────────────────────────────────────────────
    let body: serde_json::Value = client
        .get(format!("{}/api/tracing/traces/build", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 1);
    assert_eq!(body["traces"][0]["duration"], 5.0);
    assert!(body["traces"][0].get("message").is_none());
}

#[tokio::test]
async fn test_step_and_end_without_start_are_404() {
    let (base_url, _clock) = spawn_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{}/api/tracing/step", base_url))
        .json(&serde_json::json!({ "tag": "ghost", "trace_id": "x", "step_name": "s" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Trace not found: ghost:x");

    let resp = client
        .post(format!("{}/api/tracing/end", base_url))
        .json(&serde_json::json!({ "tag": "ghost" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_step_with_end_returns_end_payload() {
    let (base_url, clock) = spawn_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/api/tracing/start", base_url))
        .json(&serde_json::json!({ "tag": "deploy", "trace_id": "42" }))
        .send()
        .await
        .unwrap();

    clock.advance(Duration::milliseconds(1500));
    let body: serde_json::Value = client
        .post(format!("{}/api/tracing/step", base_url))
        .json(&serde_json::json!({
            "tag": "deploy",
            "trace_id": "42",
            "step_name": "verify",
            "end": true
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "Trace ended");
    assert_eq!(body["trace_id"], "42");
    assert_eq!(body["duration"], 1.5);
    assert_eq!(body["end_time"], body["steps"][0]["timestamp"]);
    assert_eq!(body["steps"][0]["duration"], 1.5);

    // The trace is gone once ended.
    let resp = client
        .post(format!("{}/api/tracing/end", base_url))
        .json(&serde_json::json!({ "tag": "deploy", "trace_id": "42" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let (base_url, _clock) = spawn_server().await;
    let client = reqwest::Client::new();

    for _ in 0..2 {
        client
            .post(format!("{}/api/tracing/start", base_url))
            .json(&serde_json::json!({ "tag": "tmp" }))
            .send()
            .await
            .unwrap();
        client
            .post(format!("{}/api/tracing/end", base_url))
            .json(&serde_json::json!({ "tag": "tmp" }))
            .send()
            .await
            .unwrap();
    }

    let body: serde_json::Value = client
        .get(format!("{}/api/tracing/traces/tmp", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 2);

    for _ in 0..2 {
        let resp = client
            .delete(format!("{}/api/tracing/traces/tmp", base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 204);
    }

    let body: serde_json::Value = client
        .get(format!("{}/api/tracing/traces/tmp", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 0);
    assert!(body["traces"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rpc_endpoint() {
    let (base_url, _clock) = spawn_server().await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client
        .get(format!("{}/api/rpc/methods", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["methods"].as_array().unwrap().len(), 5);

    let body: serde_json::Value = client
        .post(format!("{}/api/rpc", base_url))
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tracing.start",
            "params": { "tag": "rpc" }
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["id"], 7);
    assert_eq!(body["result"]["message"], "Trace started");
}
