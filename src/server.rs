use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api;
use crate::socket::ws_handler;
use crate::types::AppState;

/// Build the router: JSON API, WebSocket, and the static frontend as fallback
pub fn router(state: Arc<AppState>, frontend_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/layout", get(api::get_layout))
        .route("/api/summary", get(api::get_summary))
        .route("/api/dashboard", post(api::post_dashboard))
        .route("/ws", get(ws_handler))
        .fallback_service(ServeDir::new(frontend_dir))
        .layer(CorsLayer::new().allow_origin(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves when Ctrl-C is received
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
