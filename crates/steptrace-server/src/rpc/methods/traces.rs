//! RPC methods for the trace lifecycle.
//!
//! Methods:
//! - `tracing.start`  — open (or reopen) a trace
//! - `tracing.step`   — record a step; `end: true` also ends the trace
//! - `tracing.end`    — end a trace and retain its result
//! - `tracing.list`   — retained results for a tag
//! - `tracing.delete` — drop retained results for a tag

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use steptrace_core::models::{StepOutcome, TraceEnded, TraceResult, TraceStarted};

use crate::rpc::error::RpcError;
use crate::AppState;

/// Addresses one trace: a tag plus an optional trace id.
#[derive(Debug, Deserialize)]
pub struct TraceParams {
    pub tag: String,
    pub trace_id: Option<String>,
}

// ---------------------------------------------------------------------------
// tracing.start
// ---------------------------------------------------------------------------

pub fn start(state: &AppState, params: TraceParams) -> Result<TraceStarted, RpcError> {
    Ok(state
        .trace_store
        .start(&params.tag, params.trace_id.as_deref()))
}

// ---------------------------------------------------------------------------
// tracing.step
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StepParams {
    pub tag: String,
    pub trace_id: Option<String>,
    pub step_name: String,
    #[serde(default)]
    pub end: bool,
}

pub fn step(state: &AppState, params: StepParams) -> Result<StepOutcome, RpcError> {
    Ok(state.trace_store.step(
        &params.tag,
        params.trace_id.as_deref(),
        &params.step_name,
        params.end,
    )?)
}

// ---------------------------------------------------------------------------
// tracing.end
// ---------------------------------------------------------------------------

pub fn end(state: &AppState, params: TraceParams) -> Result<TraceEnded, RpcError> {
    Ok(state
        .trace_store
        .end(&params.tag, params.trace_id.as_deref())?)
}

// ---------------------------------------------------------------------------
// tracing.list
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TagParams {
    pub tag: String,
}

#[derive(Debug, Serialize)]
pub struct ListResult {
    pub tag: String,
    pub count: usize,
    pub traces: Vec<Arc<TraceResult>>,
}

pub fn list(state: &AppState, params: TagParams) -> Result<ListResult, RpcError> {
    let traces = state.trace_store.query(&params.tag);
    Ok(ListResult {
        tag: params.tag,
        count: traces.len(),
        traces,
    })
}

// ---------------------------------------------------------------------------
// tracing.delete
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    pub tag: String,
    pub deleted: bool,
}

pub fn delete(state: &AppState, params: TagParams) -> Result<DeleteResult, RpcError> {
    state.trace_store.delete(&params.tag);
    Ok(DeleteResult {
        tag: params.tag,
        deleted: true,
    })
}
