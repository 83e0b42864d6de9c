//! Notification type and status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use crate::domain::task::EventKind;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    TaskCreated,
    TaskUpdated,
    CommentCreated,
    /// Operator-issued notice. Never produced by the fan-out engine.
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::TaskCreated => "TASK_CREATED",
            NotificationType::TaskUpdated => "TASK_UPDATED",
            NotificationType::CommentCreated => "COMMENT_CREATED",
            NotificationType::System => "SYSTEM",
        }
    }
}

impl From<EventKind> for NotificationType {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::TaskCreated => NotificationType::TaskCreated,
            EventKind::TaskUpdated => NotificationType::TaskUpdated,
            EventKind::CommentCreated => NotificationType::CommentCreated,
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TASK_CREATED" => Ok(NotificationType::TaskCreated),
            "TASK_UPDATED" => Ok(NotificationType::TaskUpdated),
            "COMMENT_CREATED" => Ok(NotificationType::CommentCreated),
            "SYSTEM" => Ok(NotificationType::System),
            other => Err(ValidationError::invalid_format(
                "notification_type",
                format!("unknown type '{}'", other),
            )),
        }
    }
}

/// Read state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationStatus {
    Unread,
    Read,
    /// Reserved. No operation moves a notification here yet.
    Archived,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Unread => "UNREAD",
            NotificationStatus::Read => "READ",
            NotificationStatus::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNREAD" => Ok(NotificationStatus::Unread),
            "READ" => Ok(NotificationStatus::Read),
            "ARCHIVED" => Ok(NotificationStatus::Archived),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}
