//! steptrace core — transport-agnostic timing traces.
//!
//! A caller opens a trace under a tag (and optional trace id), appends
//! timestamped steps, and ends it to get the full timing breakdown. Ended
//! traces are retained per tag until deleted. This crate holds the domain
//! model and the store; it has **no HTTP framework dependency** by default,
//! so the same store can sit behind:
//!
//! - the axum REST adapter (via `steptrace-server`)
//! - the JSON-RPC dispatcher
//! - in-process callers and tests
//!
//! # Feature Flags
//!
//! - `axum` — Enables `IntoResponse` impl on `ServerError` for use in axum handlers.

pub mod clock;
pub mod error;
pub mod key;
pub mod models;
pub mod state;
pub mod store;

// Convenience re-exports
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use error::ServerError;
pub use key::{trace_key, DEFAULT_TRACE_ID};
pub use state::{AppState, AppStateInner};
pub use store::TraceStore;
