//! Recording delivery for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::notification::{Notification, NotificationType};
use crate::ports::{DeliveryError, DeliveryReport, NotificationDelivery};

/// One recorded `deliver` call.
#[derive(Debug, Clone)]
pub struct DeliveryCall {
    pub recipients: Vec<UserId>,
    pub kind: NotificationType,
    pub notifications: Vec<Notification>,
}

/// Records every delivery request and answers with a configurable outcome.
#[derive(Debug, Default)]
pub struct RecordingDelivery {
    calls: Mutex<Vec<DeliveryCall>>,
    failure: Mutex<Option<DeliveryError>>,
}

impl RecordingDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every later call with this error.
    pub fn failing_with(error: DeliveryError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Mutex::new(Some(error)),
        }
    }

    pub fn calls(&self) -> Vec<DeliveryCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl NotificationDelivery for RecordingDelivery {
    async fn deliver(
        &self,
        recipients: &[UserId],
        kind: NotificationType,
        notifications: &[Notification],
    ) -> Result<DeliveryReport, DeliveryError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(DeliveryCall {
                recipients: recipients.to_vec(),
                kind,
                notifications: notifications.to_vec(),
            });

        if let Some(err) = self
            .failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
        {
            return Err(err);
        }

        Ok(DeliveryReport {
            delivered: recipients.to_vec(),
            failed: Vec::new(),
        })
    }
}
