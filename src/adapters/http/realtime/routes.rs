//! HTTP routes for the realtime gateway.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::websocket::RealtimeGateway;

use super::handlers::{health, push_notifications};

/// Ingress and health routes. Merge with `websocket_router()` before
/// applying state.
pub fn realtime_routes() -> Router<RealtimeGateway> {
    Router::new()
        .route("/websocket/notifications", post(push_notifications))
        .route("/internal/notifications/websocket", post(push_notifications))
        .route("/health", get(health))
}
