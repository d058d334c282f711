//! JSON-RPC method implementations.
//!
//! Each sub-module exposes typed param/result structs and one function per
//! method taking `AppState` + params.

pub mod traces;
