//! Shared application state for every transport.

use std::sync::Arc;

use crate::clock::TimeSource;
use crate::store::TraceStore;

/// Shared state accessible by all API handlers.
pub struct AppStateInner {
    pub trace_store: TraceStore,
}

pub type AppState = Arc<AppStateInner>;

impl AppStateInner {
    pub fn new() -> Self {
        Self {
            trace_store: TraceStore::new(),
        }
    }

    /// Build state whose store reads time from `clock` (used by tests).
    pub fn with_clock(clock: Arc<dyn TimeSource>) -> Self {
        Self {
            trace_store: TraceStore::with_clock(clock),
        }
    }
}

impl Default for AppStateInner {
    fn default() -> Self {
        Self::new()
    }
}
