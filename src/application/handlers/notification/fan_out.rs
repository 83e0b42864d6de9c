//! NotificationFanOut - Event handler turning task events into notifications.
//!
//! For each consumed event:
//! 1. Works out the recipients and message (see `NotificationPlan`)
//! 2. Persists one UNREAD notification per recipient in a single batch
//! 3. Hands the batch to the delivery bridge for realtime push
//!
//! Persistence failures propagate so the message is rejected. Delivery is
//! best-effort: notifications are already stored and can be polled, so a
//! failed push is logged and the event still succeeds.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::notification::NotificationPlan;
use crate::domain::task::DomainEvent;
use crate::ports::{EventHandler, NotificationDelivery, NotificationRepository};

pub struct NotificationFanOut {
    repository: Arc<dyn NotificationRepository>,
    delivery: Arc<dyn NotificationDelivery>,
}

impl NotificationFanOut {
    pub fn new(
        repository: Arc<dyn NotificationRepository>,
        delivery: Arc<dyn NotificationDelivery>,
    ) -> Self {
        Self {
            repository,
            delivery,
        }
    }
}

#[async_trait]
impl EventHandler for NotificationFanOut {
    async fn handle(&self, event: DomainEvent) -> Result<(), DomainError> {
        let plan = match NotificationPlan::for_event(&event) {
            Some(plan) => plan,
            None => {
                tracing::debug!(
                    event_kind = %event.kind(),
                    task_id = %event.task_id(),
                    "No recipients, skipping"
                );
                return Ok(());
            }
        };

        let notifications = plan.to_notifications();
        self.repository.save_all(&notifications).await?;

        tracing::info!(
            event_kind = %plan.kind,
            task_id = %event.task_id(),
            recipients = plan.recipients.len(),
            "Notifications created"
        );

        match self
            .delivery
            .deliver(&plan.recipients, plan.notification_type(), &notifications)
            .await
        {
            Ok(report) => {
                tracing::debug!(delivered = report.delivered.len(), "Realtime delivery complete");
            }
            Err(e) => {
                tracing::warn!(
                    event_kind = %plan.kind,
                    task_id = %event.task_id(),
                    error = %e,
                    "Realtime delivery failed, notifications remain stored"
                );
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationFanOut"
    }
}
