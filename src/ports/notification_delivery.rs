//! NotificationDelivery port - hands persisted notifications to the realtime
//! side for push.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::notification::{Notification, NotificationType};

/// Outcome of one delivery attempt across all recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipients the gateway accepted a push request for.
    pub delivered: Vec<UserId>,
    /// Recipients whose push request failed, with the reason.
    pub failed: Vec<(UserId, String)>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Clone, Error)]
pub enum DeliveryError {
    /// Some recipients could not be reached. Others may have been.
    #[error("Delivery failed for {} of {} recipients", .0.failed.len(), .0.failed.len() + .0.delivered.len())]
    Partial(DeliveryReport),

    /// The bridge could not attempt delivery at all.
    #[error("Delivery unavailable: {0}")]
    Unavailable(String),
}

/// Pushes freshly created notifications towards connected sessions.
///
/// Best-effort: callers log failures and carry on, since notifications are
/// already persisted and can be polled.
#[async_trait]
pub trait NotificationDelivery: Send + Sync {
    /// Deliver the notifications belonging to each recipient.
    ///
    /// Recipients with no notification in `notifications` are skipped.
    async fn deliver(
        &self,
        recipients: &[UserId],
        kind: NotificationType,
        notifications: &[Notification],
    ) -> Result<DeliveryReport, DeliveryError>;
}
