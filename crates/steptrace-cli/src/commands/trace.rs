//! `steptrace start|step|end|list|delete|rpc` — trace commands sent to a
//! running server over its JSON-RPC endpoint.

use serde_json::{json, Value};

/// JSON-RPC client for a steptrace server.
#[derive(Clone)]
pub struct TraceClient {
    http: reqwest::Client,
    base_url: String,
}

impl TraceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send one JSON-RPC call and return its `result`, or the error message.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, String> {
        let url = format!("{}/api/rpc", self.base_url);
        tracing::debug!(%url, method, "Sending RPC call");

        let response: Value = self
            .http
            .post(&url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": method,
                "params": params,
            }))
            .send()
            .await
            .map_err(|e| format!("Failed to reach {}: {}", url, e))?
            .error_for_status()
            .map_err(|e| format!("Server rejected request: {}", e))?
            .json()
            .await
            .map_err(|e| format!("Invalid response from server: {}", e))?;

        if let Some(error) = response.get("error") {
            return Err(format!(
                "{} (code {})",
                error["message"].as_str().unwrap_or("unknown error"),
                error["code"]
            ));
        }

        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }
}

pub async fn start(client: &TraceClient, tag: &str, trace_id: Option<&str>) -> Result<Value, String> {
    client
        .call("tracing.start", json!({ "tag": tag, "trace_id": trace_id }))
        .await
}

pub async fn step(
    client: &TraceClient,
    tag: &str,
    trace_id: Option<&str>,
    step_name: &str,
    end: bool,
) -> Result<Value, String> {
    client
        .call(
            "tracing.step",
            json!({
                "tag": tag,
                "trace_id": trace_id,
                "step_name": step_name,
                "end": end,
            }),
        )
        .await
}

pub async fn end(client: &TraceClient, tag: &str, trace_id: Option<&str>) -> Result<Value, String> {
    client
        .call("tracing.end", json!({ "tag": tag, "trace_id": trace_id }))
        .await
}

pub async fn list(client: &TraceClient, tag: &str) -> Result<Value, String> {
    client.call("tracing.list", json!({ "tag": tag })).await
}

pub async fn delete(client: &TraceClient, tag: &str) -> Result<Value, String> {
    client.call("tracing.delete", json!({ "tag": tag })).await
}

/// Send an arbitrary method with params given as a JSON string.
pub async fn rpc(client: &TraceClient, method: &str, params: &str) -> Result<Value, String> {
    let params: Value =
        serde_json::from_str(params).map_err(|e| format!("Invalid params JSON: {}", e))?;
    client.call(method, params).await
}
