//! JSON-RPC 2.0 endpoint powered by `crate::rpc`.
//!
//! Exposes `POST /api/rpc` — a single endpoint for all JSON-RPC method calls.
//! Also exposes `GET /api/rpc/methods` for method discovery.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::rpc::RpcRouter;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(rpc_handler))
        .route("/methods", get(list_methods))
}

/// POST /api/rpc — JSON-RPC 2.0 endpoint (single or batch).
async fn rpc_handler(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let rpc = RpcRouter::new(state);
    Json(rpc.handle_value(body))
}

/// GET /api/rpc/methods — list all supported JSON-RPC method names.
async fn list_methods() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "methods": RpcRouter::method_list() }))
}
