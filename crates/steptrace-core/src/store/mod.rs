pub mod trace_store;

pub use trace_store::TraceStore;
