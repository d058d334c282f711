//! In-memory store for live and retained traces.
//!
//! Both maps sit behind one mutex, so every lifecycle transition (including
//! `end`, which removes from the live map and appends to the retained map)
//! is atomic with respect to every other operation. Each operation holds the
//! lock for a map lookup plus a small mutation and reads the clock once
//! while holding it, so steps on one key are timestamped in append order.
//!
//! Retained results are never evicted. Callers own cleanup through
//! [`TraceStore::delete`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::clock::{SystemClock, TimeSource};
use crate::error::ServerError;
use crate::key::trace_key;
use crate::models::trace::{
    StepAdded, StepOutcome, TraceContext, TraceEnded, TraceResult, TraceStarted, STEP_ADDED,
    TRACE_STARTED,
};

#[derive(Default)]
struct TraceStoreInner {
    /// Open traces, keyed by `trace_key(tag, trace_id)`.
    live: HashMap<String, TraceContext>,
    /// Completed traces per tag, in completion order.
    results: HashMap<String, Vec<Arc<TraceResult>>>,
}

impl TraceStoreInner {
    fn finish(
        &mut self,
        key: &str,
        tag: &str,
        trace_id: Option<&str>,
        end_time: DateTime<Utc>,
    ) -> Result<TraceEnded, ServerError> {
        let ctx = self
            .live
            .remove(key)
            .ok_or_else(|| ServerError::NotFound(key.to_string()))?;

        let result = Arc::new(ctx.finish(tag, trace_id.map(str::to_string), end_time));
        self.results
            .entry(tag.to_string())
            .or_default()
            .push(Arc::clone(&result));

        tracing::debug!(
            key,
            duration = result.duration,
            steps = result.steps.len(),
            "Trace ended"
        );
        Ok(TraceEnded::from(result))
    }
}

/// Thread-safe trace store shared by all request handlers.
pub struct TraceStore {
    inner: Mutex<TraceStoreInner>,
    clock: Arc<dyn TimeSource>,
}

impl TraceStore {
    /// Create a store backed by the system wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            inner: Mutex::new(TraceStoreInner::default()),
            clock,
        }
    }

    // Every mutation under the lock is a single insert/remove/push, so the
    // maps are consistent even if a holder panicked.
    fn lock(&self) -> MutexGuard<'_, TraceStoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a trace, replacing any live trace under the same key.
    ///
    /// Replacing discards the previous trace's steps and logs a warning;
    /// results already retained for the tag are untouched.
    pub fn start(&self, tag: &str, trace_id: Option<&str>) -> TraceStarted {
        let key = trace_key(tag, trace_id);
        let mut inner = self.lock();
        let now = self.clock.now();

        if let Some(previous) = inner.live.insert(key.clone(), TraceContext::new(now)) {
            tracing::warn!(
                tag,
                trace_id,
                key = %key,
                discarded_steps = previous.steps.len(),
                "Trace already live; overwriting with a new trace"
            );
        } else {
            tracing::debug!(key = %key, "Trace started");
        }

        TraceStarted {
            message: TRACE_STARTED.to_string(),
            tag: tag.to_string(),
            trace_id: trace_id.map(str::to_string),
            start_time: now,
        }
    }

    /// Record a step on a live trace.
    ///
    /// With `end = true` the trace is also ended, using the step's timestamp
    /// as the end time, and the end-of-trace record is returned instead.
    pub fn step(
        &self,
        tag: &str,
        trace_id: Option<&str>,
        step_name: &str,
        end: bool,
    ) -> Result<StepOutcome, ServerError> {
        let key = trace_key(tag, trace_id);
        let mut inner = self.lock();

        let ctx = inner
            .live
            .get_mut(&key)
            .ok_or_else(|| ServerError::NotFound(key.clone()))?;
        let now = self.clock.now();
        let step = ctx.add_step(step_name, now);

        if end {
            return inner
                .finish(&key, tag, trace_id, now)
                .map(StepOutcome::Ended);
        }

        Ok(StepOutcome::Added(StepAdded {
            message: STEP_ADDED.to_string(),
            tag: tag.to_string(),
            trace_id: trace_id.map(str::to_string),
            step_name: step.step_name,
            timestamp: step.timestamp,
            duration: step.duration,
        }))
    }

    /// End a live trace now and retain its result under the tag.
    pub fn end(&self, tag: &str, trace_id: Option<&str>) -> Result<TraceEnded, ServerError> {
        self.end_at(tag, trace_id, None)
    }

    /// End a live trace at `timestamp`, or now when `None`.
    pub fn end_at(
        &self,
        tag: &str,
        trace_id: Option<&str>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<TraceEnded, ServerError> {
        let key = trace_key(tag, trace_id);
        let mut inner = self.lock();
        let end_time = timestamp.unwrap_or_else(|| self.clock.now());
        inner.finish(&key, tag, trace_id, end_time)
    }

    /// All retained results for `tag`, oldest completion first.
    pub fn query(&self, tag: &str) -> Vec<Arc<TraceResult>> {
        self.lock().results.get(tag).cloned().unwrap_or_default()
    }

    /// Drop every retained result for `tag`. Deleting an unknown tag is a no-op.
    pub fn delete(&self, tag: &str) {
        if let Some(removed) = self.lock().results.remove(tag) {
            tracing::debug!(tag, count = removed.len(), "Deleted retained traces");
        }
    }

    /// Number of traces currently open.
    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }
}

impl Default for TraceStore {
    fn default() -> Self {
        Self::new()
    }
}
