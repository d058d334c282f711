//! steptrace server — HTTP front end for the trace store.
//!
//! Provides:
//! - RESTful HTTP API via axum (`/api/tracing/...`)
//! - A JSON-RPC 2.0 endpoint over the same state (`/api/rpc`)
//! - A health check (`/api/health`)
//!
//! The store lives in memory for the lifetime of the process; nothing is
//! persisted.

pub mod api;
pub mod rpc;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use steptrace_core::state::{AppState, AppStateInner};

/// Configuration for the steptrace HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3210,
        }
    }
}

/// Create a fresh, empty `AppState` backed by the system clock.
pub fn create_app_state() -> AppState {
    Arc::new(AppStateInner::new())
}

/// Build the full HTTP router (API routes, health check, CORS, request tracing).
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::api_router())
        .route("/api/health", axum::routing::get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server with a fresh state.
///
/// Initializes logging and returns the actual address the server is
/// listening on; the server itself runs in a background task.
pub async fn start_server(config: ServerConfig) -> Result<SocketAddr, String> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "steptrace_server=info,steptrace_core=info,tower_http=info".into()
            }),
        )
        .try_init();

    tracing::info!(
        "Starting steptrace server on {}:{}",
        config.host,
        config.port
    );

    start_server_with_state(config, create_app_state()).await
}

/// Start the HTTP server with a pre-built `AppState`.
///
/// This variant is useful when the state is shared with another consumer
/// (an in-process `RpcRouter`, or a test holding a manual clock).
pub async fn start_server_with_state(
    config: ServerConfig,
    state: AppState,
) -> Result<SocketAddr, String> {
    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get local address: {}", e))?;

    tracing::info!("steptrace server listening on {}", local_addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(local_addr)
}

async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "server": "steptrace-server",
        "version": env!("CARGO_PKG_VERSION"),
        "live_traces": state.trace_store.live_count(),
    }))
}
