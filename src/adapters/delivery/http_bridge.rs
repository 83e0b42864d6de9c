//! HTTP delivery bridge to the realtime gateway.
//!
//! The worker and the gateway are separate processes. For every recipient
//! that has notifications in the batch, the bridge POSTs one push request to
//! the gateway's ingress endpoint; the gateway then emits to that user's
//! room. Requests run concurrently and fail independently.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;

use crate::domain::foundation::UserId;
use crate::domain::notification::{Notification, NotificationType};
use crate::ports::{DeliveryError, DeliveryReport, NotificationDelivery};

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3001/websocket/notifications";

#[derive(Debug, Clone)]
pub struct HttpDeliveryConfig {
    /// Full URL of the gateway ingress endpoint.
    pub gateway_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for HttpDeliveryConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Body of one push request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PushRequest<'a> {
    user_id: &'a UserId,
    event_kind: NotificationType,
    notifications: Vec<&'a Notification>,
}

#[derive(Clone)]
pub struct HttpDeliveryBridge {
    client: reqwest::Client,
    gateway_url: String,
}

impl HttpDeliveryBridge {
    pub fn new(config: HttpDeliveryConfig) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::Unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            gateway_url: config.gateway_url,
        })
    }

    async fn push(&self, request: PushRequest<'_>) -> Result<(), String> {
        let response = self
            .client
            .post(&self.gateway_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("gateway responded {}", response.status()));
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationDelivery for HttpDeliveryBridge {
    async fn deliver(
        &self,
        recipients: &[UserId],
        kind: NotificationType,
        notifications: &[Notification],
    ) -> Result<DeliveryReport, DeliveryError> {
        let pushes = recipients.iter().filter_map(|user_id| {
            let owned: Vec<&Notification> = notifications
                .iter()
                .filter(|n| n.is_owned_by(user_id))
                .collect();
            if owned.is_empty() {
                return None;
            }

            let request = PushRequest {
                user_id,
                event_kind: kind,
                notifications: owned,
            };
            Some(async move { (user_id, self.push(request).await) })
        });

        let mut report = DeliveryReport::default();
        for (user_id, outcome) in join_all(pushes).await {
            match outcome {
                Ok(()) => report.delivered.push(user_id.clone()),
                Err(reason) => {
                    tracing::debug!(user_id = %user_id, reason = %reason, "Push request failed");
                    report.failed.push((user_id.clone(), reason));
                }
            }
        }

        if report.is_complete() {
            Ok(report)
        } else {
            Err(DeliveryError::Partial(report))
        }
    }
}
