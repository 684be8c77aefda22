//! API layer - WebSocket entry point and health check.

use std::sync::Arc;

use axum::{routing::get, Router};

pub mod connections;
pub mod websocket;

pub use connections::{ConnectionInfo, ConnectionManager};

use websocket::WsState;

/// Router with the WebSocket endpoint and a liveness check.
pub fn routes(state: Arc<WsState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws", get(websocket::ws_handler))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
