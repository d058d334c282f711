//! JSON-RPC dispatch tests, exercising `RpcRouter` without HTTP.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use steptrace_core::ManualClock;
use steptrace_server::rpc::types::{INVALID_PARAMS, METHOD_NOT_FOUND, NOT_FOUND, PARSE_ERROR};
use steptrace_server::rpc::RpcRouter;
use steptrace_server::{AppState, AppStateInner};

fn test_router() -> (RpcRouter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
    ));
    let state: AppState = Arc::new(AppStateInner::with_clock(clock.clone()));
    (RpcRouter::new(state), clock)
}

fn call(router: &RpcRouter, id: i64, method: &str, params: serde_json::Value) -> serde_json::Value {
    router.handle_value(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    }))
}

#[test]
fn test_full_lifecycle() {
    let (router, clock) = test_router();

    let response = call(&router, 1, "tracing.start", json!({ "tag": "etl", "trace_id": "run-1" }));
    assert_eq!(response["result"]["trace_id"], "run-1");

    clock.advance(Duration::seconds(3));
    let response = call(
        &router,
        2,
        "tracing.step",
        json!({ "tag": "etl", "trace_id": "run-1", "step_name": "extract" }),
    );
    assert_eq!(response["result"]["duration"], 3.0);

    clock.advance(Duration::seconds(1));
    let response = call(&router, 3, "tracing.end", json!({ "tag": "etl", "trace_id": "run-1" }));
    let result = &response["result"];
    assert_eq!(result["duration"], 4.0);
    assert_eq!(result["steps"].as_array().unwrap().len(), 1);

    let response = call(&router, 4, "tracing.list", json!({ "tag": "etl" }));
    assert_eq!(response["result"]["count"], 1);
    assert_eq!(response["result"]["traces"][0]["trace_id"], "run-1");

    let response = call(&router, 5, "tracing.delete", json!({ "tag": "etl" }));
    assert_eq!(response["result"]["deleted"], true);

    let response = call(&router, 6, "tracing.list", json!({ "tag": "etl" }));
    assert_eq!(response["result"]["count"], 0);
}

#[test]
fn test_not_found_maps_to_application_code() {
    let (router, _clock) = test_router();

    let response = call(&router, 1, "tracing.end", json!({ "tag": "missing" }));
    assert!(response.get("result").is_none());
    assert_eq!(response["error"]["code"], NOT_FOUND);
    assert_eq!(response["id"], 1);
}

#[test]
fn test_invalid_params_and_unknown_method() {
    let (router, _clock) = test_router();

    let response = call(&router, 1, "tracing.step", json!({ "tag": "no-step-name" }));
    assert_eq!(response["error"]["code"], INVALID_PARAMS);

    let response = call(&router, 2, "tracing.pause", json!({}));
    assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
}

#[test]
fn test_raw_batch_request() {
    let (router, _clock) = test_router();

    let raw = r#"[
        {"jsonrpc": "2.0", "id": 1, "method": "tracing.start", "params": {"tag": "batch"}},
        {"jsonrpc": "2.0", "id": 2, "method": "tracing.step", "params": {"tag": "batch", "step_name": "only", "end": true}}
    ]"#;
    let response: serde_json::Value = serde_json::from_str(&router.handle_request(raw)).unwrap();
    let responses = response.as_array().unwrap();

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[1]["result"]["message"], "Trace ended");
    assert_eq!(responses[1]["result"]["steps"][0]["step_name"], "only");
}

#[test]
fn test_parse_error() {
    let (router, _clock) = test_router();

    let response: serde_json::Value =
        serde_json::from_str(&router.handle_request("{not json")).unwrap();
    assert_eq!(response["error"]["code"], PARSE_ERROR);
}
