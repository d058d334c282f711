pub mod rpc;
pub mod traces;

use axum::Router;

use crate::AppState;

/// Build the complete API router with all sub-routes.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/tracing", traces::router())
        .nest("/api/rpc", rpc::router())
}
