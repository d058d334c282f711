//! Core error type for steptrace.
//!
//! `ServerError` is returned by the trace store: `step` and `end` on a key
//! with no live trace. When the `axum` feature is enabled, it also
//! implements `IntoResponse` so it can be used directly as an axum handler
//! error type.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerError {
    /// No live trace under the storage key.
    #[error("Trace not found: {0}")]
    NotFound(String),
}

// ---------------------------------------------------------------------------
// axum integration (opt-in via feature flag)
// ---------------------------------------------------------------------------

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match &self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
