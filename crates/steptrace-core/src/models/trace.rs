//! Trace domain types.
//!
//! `TraceContext` is the live, mutable form of a trace; `TraceResult` is
//! the immutable record produced when it ends. The remaining types are the
//! payloads returned by the store operations. All timestamps serialize as
//! RFC 3339 strings and all durations as floating-point seconds.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::seconds_between;

/// One recorded checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_name: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the previous step, or since the trace started for the
    /// first step.
    pub duration: f64,
}

/// A live, in-progress trace.
#[derive(Debug)]
pub struct TraceContext {
    pub start_time: DateTime<Utc>,
    pub steps: Vec<TraceStep>,
}

impl TraceContext {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            steps: Vec::new(),
        }
    }

    fn previous_timestamp(&self) -> DateTime<Utc> {
        self.steps
            .last()
            .map(|step| step.timestamp)
            .unwrap_or(self.start_time)
    }

    /// Append a step recorded at `timestamp` and return a copy of it.
    pub fn add_step(&mut self, step_name: impl Into<String>, timestamp: DateTime<Utc>) -> TraceStep {
        let step = TraceStep {
            step_name: step_name.into(),
            timestamp,
            duration: seconds_between(timestamp, self.previous_timestamp()),
        };
        self.steps.push(step.clone());
        step
    }

    /// Close the trace at `end_time`, moving its steps into the result.
    pub fn finish(
        self,
        tag: impl Into<String>,
        trace_id: Option<String>,
        end_time: DateTime<Utc>,
    ) -> TraceResult {
        TraceResult {
            tag: tag.into(),
            trace_id,
            start_time: self.start_time,
            end_time,
            duration: seconds_between(end_time, self.start_time),
            steps: self.steps,
        }
    }
}

/// The retained record of a completed trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceResult {
    pub tag: String,
    pub trace_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// `end_time - start_time`, in seconds.
    pub duration: f64,
    pub steps: Vec<TraceStep>,
}

// ---------------------------------------------------------------------------
// Operation payloads
// ---------------------------------------------------------------------------

pub const TRACE_STARTED: &str = "Trace started";
pub const STEP_ADDED: &str = "Step added";
pub const TRACE_ENDED: &str = "Trace ended";

/// Returned by `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStarted {
    pub message: String,
    pub tag: String,
    pub trace_id: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Returned by `step` when the trace stays open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAdded {
    pub message: String,
    pub tag: String,
    pub trace_id: Option<String>,
    pub step_name: String,
    pub timestamp: DateTime<Utc>,
    pub duration: f64,
}

/// Returned by `end`, and by `step` with `end = true`.
///
/// `trace` is the same allocation the store retains for the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEnded {
    pub message: String,
    #[serde(flatten)]
    pub trace: Arc<TraceResult>,
}

impl From<Arc<TraceResult>> for TraceEnded {
    fn from(trace: Arc<TraceResult>) -> Self {
        Self {
            message: TRACE_ENDED.to_string(),
            trace,
        }
    }
}

/// Outcome of a `step` call: either the recorded step, or the full
/// end-of-trace record when the caller asked to end the trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepOutcome {
    Ended(TraceEnded),
    Added(StepAdded),
}
