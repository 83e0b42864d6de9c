//! HTTP DTOs for the realtime gateway's ingress.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Push request posted by the delivery bridge.
///
/// `eventKind` is matched loosely: unknown kinds are still delivered under
/// the generic `notification` event name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushNotificationRequest {
    pub user_id: String,
    #[serde(alias = "type")]
    pub event_kind: String,
    #[serde(default)]
    pub notifications: Vec<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayHealthResponse {
    pub status: String,
    pub service: String,
    pub connected_users: usize,
    pub timestamp: String,
}
