//! Notification entity.
//!
//! One row per recipient. Created UNREAD by the fan-out engine; after that
//! only its recipient may change or delete it.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{NotificationId, Timestamp, UserId};

use super::{NotificationStatus, NotificationType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,

    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    pub title: String,

    pub message: String,

    /// Free-form payload, shaped per notification type.
    pub data: JsonValue,

    pub status: NotificationStatus,

    /// The single user this notification belongs to.
    #[serde(rename = "userId")]
    pub recipient_id: UserId,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Notification {
    /// Creates a new unread notification for one recipient.
    pub fn new(
        recipient_id: UserId,
        notification_type: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        data: JsonValue,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: NotificationId::new(),
            notification_type,
            title: title.into(),
            message: message.into(),
            data,
            status: NotificationStatus::Unread,
            recipient_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.recipient_id == user_id
    }

    /// Marks the notification read. Returns false if it already was.
    pub fn mark_read(&mut self) -> bool {
        if self.status == NotificationStatus::Read {
            return false;
        }
        self.status = NotificationStatus::Read;
        self.updated_at = Timestamp::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Notification {
        Notification::new(
            UserId::new("u-1").unwrap(),
            NotificationType::TaskCreated,
            "New task assigned",
            "You were assigned to task: Docs",
            json!({"taskId": "t-1"}),
        )
    }

    #[test]
    fn new_notification_is_unread() {
        let n = sample();
        assert!(n.is_unread());
        assert_eq!(n.created_at, n.updated_at);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let mut n = sample();
        assert!(n.mark_read());
        assert!(!n.mark_read());
        assert_eq!(n.status, NotificationStatus::Read);
    }

    #[test]
    fn ownership_is_by_recipient() {
        let n = sample();
        assert!(n.is_owned_by(&UserId::new("u-1").unwrap()));
        assert!(!n.is_owned_by(&UserId::new("u-2").unwrap()));
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "TASK_CREATED");
        assert_eq!(value["status"], "UNREAD");
        assert_eq!(value["userId"], "u-1");
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["data"]["taskId"], "t-1");
    }
}
