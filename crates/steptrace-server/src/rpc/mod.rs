//! Transport-agnostic JSON-RPC 2.0 layer over the trace store.
//!
//! Same operations as the REST API, decoupled from any HTTP framework so
//! they can be driven from:
//!
//! - **HTTP** — via the axum endpoint at `/api/rpc`
//! - **In-process** — direct calls on `RpcRouter`
//!
//! # Example
//!
//! ```ignore
//! use steptrace_server::rpc::RpcRouter;
//!
//! let router = RpcRouter::new(app_state);
//! let response = router.handle_request(r#"{
//!     "jsonrpc": "2.0",
//!     "id": 1,
//!     "method": "tracing.start",
//!     "params": { "tag": "build" }
//! }"#);
//! ```
//!
//! # Supported Methods
//!
//! | Method           | Description                                 |
//! |------------------|---------------------------------------------|
//! | `tracing.start`  | Open (or reopen) a trace                    |
//! | `tracing.step`   | Record a step, optionally ending the trace  |
//! | `tracing.end`    | End a trace and retain its result           |
//! | `tracing.list`   | Retained results for a tag                  |
//! | `tracing.delete` | Drop retained results for a tag             |

pub mod error;
pub mod methods;
pub mod router;
pub mod types;

pub use error::RpcError;
pub use router::RpcRouter;
pub use types::{JsonRpcRequest, JsonRpcResponse};
