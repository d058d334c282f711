//! REST endpoints for the trace lifecycle.
//!
//! - `POST   /api/tracing/start`        — open (or reopen) a trace
//! - `POST   /api/tracing/step`         — record a step, optionally ending the trace
//! - `POST   /api/tracing/end`          — end a trace and retain its result
//! - `GET    /api/tracing/traces/{tag}` — retained results for a tag
//! - `DELETE /api/tracing/traces/{tag}` — drop retained results for a tag

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use steptrace_core::models::{StepOutcome, TraceEnded, TraceStarted};
use steptrace_core::ServerError;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_trace))
        .route("/step", post(add_step))
        .route("/end", post(end_trace))
        .route("/traces/{tag}", get(get_traces).delete(delete_traces))
}

#[derive(Debug, Deserialize)]
struct StartTraceRequest {
    tag: String,
    trace_id: Option<String>,
}

async fn start_trace(
    State(state): State<AppState>,
    Json(body): Json<StartTraceRequest>,
) -> Json<TraceStarted> {
    Json(
        state
            .trace_store
            .start(&body.tag, body.trace_id.as_deref()),
    )
}

#[derive(Debug, Deserialize)]
struct AddStepRequest {
    tag: String,
    trace_id: Option<String>,
    step_name: String,
    #[serde(default)]
    end: bool,
}

async fn add_step(
    State(state): State<AppState>,
    Json(body): Json<AddStepRequest>,
) -> Result<Json<StepOutcome>, ServerError> {
    state
        .trace_store
        .step(&body.tag, body.trace_id.as_deref(), &body.step_name, body.end)
        .map(Json)
}

#[derive(Debug, Deserialize)]
struct EndTraceRequest {
    tag: String,
    trace_id: Option<String>,
}

async fn end_trace(
    State(state): State<AppState>,
    Json(body): Json<EndTraceRequest>,
) -> Result<Json<TraceEnded>, ServerError> {
    state
        .trace_store
        .end(&body.tag, body.trace_id.as_deref())
        .map(Json)
}

async fn get_traces(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Json<serde_json::Value> {
    let traces = state.trace_store.query(&tag);
    Json(serde_json::json!({
        "tag": tag,
        "count": traces.len(),
        "traces": traces,
    }))
}

async fn delete_traces(State(state): State<AppState>, Path(tag): Path<String>) -> StatusCode {
    state.trace_store.delete(&tag);
    StatusCode::NO_CONTENT
}
