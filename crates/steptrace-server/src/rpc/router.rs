//! Transport-agnostic JSON-RPC 2.0 dispatcher.
//!
//! `RpcRouter` takes an `AppState` and dispatches incoming JSON-RPC requests
//! to the matching method handler. Every trace operation completes without
//! suspending, so dispatch is synchronous.

use serde::Serialize;

use crate::AppState;

use super::error::RpcError;
use super::methods;
use super::types::*;

const SERIALIZE_FAILURE: &str =
    r#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"Failed to serialize response"},"id":null}"#;

/// Transport-agnostic JSON-RPC router.
#[derive(Clone)]
pub struct RpcRouter {
    state: AppState,
}

impl RpcRouter {
    /// Create a new router backed by the given application state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Handle a raw JSON string (single request or batch) and return the
    /// serialized response.
    pub fn handle_request(&self, raw: &str) -> String {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                return serde_json::to_string(&JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
                .unwrap_or_else(|_| SERIALIZE_FAILURE.into());
            }
        };

        serde_json::to_string(&self.handle_value(value))
            .unwrap_or_else(|_| SERIALIZE_FAILURE.into())
    }

    /// Handle a pre-parsed `serde_json::Value`. Arrays are treated as batches.
    pub fn handle_value(&self, value: serde_json::Value) -> serde_json::Value {
        if let serde_json::Value::Array(batch) = value {
            let responses: Vec<serde_json::Value> =
                batch.into_iter().map(|req| self.handle_single(req)).collect();
            return serde_json::Value::Array(responses);
        }
        self.handle_single(value)
    }

    fn handle_single(&self, value: serde_json::Value) -> serde_json::Value {
        let response = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(req) => self.dispatch(req),
            Err(e) => JsonRpcResponse::error(None, INVALID_REQUEST, format!("Invalid request: {}", e)),
        };
        serde_json::to_value(response).unwrap_or_default()
    }

    /// Dispatch a parsed JSON-RPC request to the correct method handler.
    pub fn dispatch(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        if req.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                "Invalid JSON-RPC version, expected \"2.0\"",
            );
        }

        let id = req.id.clone();
        let params = req
            .params
            .unwrap_or(serde_json::Value::Object(Default::default()));

        match self.route(&req.method, params) {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                tracing::debug!(method = %req.method, error = %err, "RPC call failed");
                err.to_response(id)
            }
        }
    }

    fn route(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value, RpcError> {
        match method {
            "tracing.start" => to_result(methods::traces::start(&self.state, parse_params(params)?)?),
            "tracing.step" => to_result(methods::traces::step(&self.state, parse_params(params)?)?),
            "tracing.end" => to_result(methods::traces::end(&self.state, parse_params(params)?)?),
            "tracing.list" => to_result(methods::traces::list(&self.state, parse_params(params)?)?),
            "tracing.delete" => {
                to_result(methods::traces::delete(&self.state, parse_params(params)?)?)
            }
            _ => Err(RpcError::MethodNotFound(method.to_string())),
        }
    }

    /// All supported RPC method names, for discovery endpoints.
    pub fn method_list() -> Vec<&'static str> {
        vec![
            "tracing.start",
            "tracing.step",
            "tracing.end",
            "tracing.list",
            "tracing.delete",
        ]
    }
}

/// Deserialize `serde_json::Value` into a typed params struct.
fn parse_params<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::InvalidParams(e.to_string()))
}

fn to_result<T: Serialize>(value: T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::Internal(e.to_string()))
}
