//! CLI command implementations.
//!
//! `server` runs the HTTP service in-process. Every other command is a thin
//! client that sends one JSON-RPC call to a running server, so a single
//! trace can be driven from several processes.

pub mod server;
pub mod trace;

/// Pretty-print a JSON value to stdout.
pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}
