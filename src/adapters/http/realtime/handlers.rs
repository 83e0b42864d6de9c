//! HTTP handlers for the realtime gateway's ingress.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::adapters::websocket::RealtimeGateway;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::realtime::push_event_name;

use super::dto::{GatewayHealthResponse, MessageResponse, PushNotificationRequest};

/// POST /websocket/notifications - Push notifications to a user's sessions
///
/// Succeeds whether or not the user is connected.
pub async fn push_notifications(
    State(gateway): State<RealtimeGateway>,
    Json(req): Json<PushNotificationRequest>,
) -> Response {
    let user_id = match UserId::new(req.user_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"code": "BAD_REQUEST", "message": e.to_string()})),
            )
                .into_response()
        }
    };

    let event = push_event_name(&req.event_kind);
    let count = req.notifications.len();
    let payload = json!({
        "type": req.event_kind,
        "notifications": req.notifications,
        "timestamp": Timestamp::now().to_rfc3339(),
    });

    let reached = gateway.send_to_user(&user_id, event, payload).await;
    tracing::debug!(
        user_id = %user_id,
        event,
        notifications = count,
        sessions = reached,
        "Pushed notifications"
    );

    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "WebSocket notification sent".to_string(),
        }),
    )
        .into_response()
}

/// GET /health
pub async fn health(State(gateway): State<RealtimeGateway>) -> Json<GatewayHealthResponse> {
    Json(GatewayHealthResponse {
        status: "ok".to_string(),
        service: "realtime-gateway".to_string(),
        connected_users: gateway.connected_user_count().await,
        timestamp: Timestamp::now().to_rfc3339(),
    })
}
