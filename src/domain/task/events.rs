//! Task domain events as carried on the broker.
//!
//! Producers publish each event as a JSON envelope `{"pattern", "data"}` on
//! the `task.events` topic exchange. The routing key selects the kind, so the
//! payload shape is decided by the queue the message arrived on, not by the
//! envelope contents.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

use crate::domain::foundation::{DomainError, ErrorCode, TaskId, UserId};

// ════════════════════════════════════════════════════════════════════════════
// EventKind
// ════════════════════════════════════════════════════════════════════════════

/// The event kinds this pipeline consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TaskCreated,
    TaskUpdated,
    CommentCreated,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [
        EventKind::TaskCreated,
        EventKind::TaskUpdated,
        EventKind::CommentCreated,
    ];

    /// Routing key the producer publishes this kind under.
    pub fn routing_key(&self) -> &'static str {
        match self {
            EventKind::TaskCreated => "task.created",
            EventKind::TaskUpdated => "task.updated",
            EventKind::CommentCreated => "task.comment.created",
        }
    }

    /// Durable queue bound to this kind's routing key.
    pub fn queue_name(&self) -> String {
        format!("notifications.{}", self.routing_key())
    }

    pub fn from_routing_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.routing_key() == key)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.routing_key())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Snapshots
// ════════════════════════════════════════════════════════════════════════════

/// A user as embedded in task and comment payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            username: None,
            email: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// State of a task at the moment the event was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned_users: Vec<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
}

impl TaskSnapshot {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            description: None,
            priority: None,
            status: None,
            assigned_users: Vec::new(),
            created_by: None,
        }
    }

    pub fn with_assignees(mut self, users: impl IntoIterator<Item = UserRef>) -> Self {
        self.assigned_users = users.into_iter().collect();
        self
    }

    pub fn with_creator(mut self, user: UserRef) -> Self {
        self.created_by = Some(user);
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A comment as loaded by the producer, including its parent task if joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentSnapshot {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentCreatedData {
    task_id: TaskId,
    comment: CommentSnapshot,
}

// ════════════════════════════════════════════════════════════════════════════
// DomainEvent
// ════════════════════════════════════════════════════════════════════════════

/// An immutable task-domain event.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    TaskCreated(TaskSnapshot),
    TaskUpdated(TaskSnapshot),
    CommentCreated {
        task_id: TaskId,
        comment: CommentSnapshot,
    },
}

/// Wire wrapper around every broker message body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    #[serde(default)]
    pub pattern: Option<String>,
    pub data: JsonValue,
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::TaskCreated(_) => EventKind::TaskCreated,
            DomainEvent::TaskUpdated(_) => EventKind::TaskUpdated,
            DomainEvent::CommentCreated { .. } => EventKind::CommentCreated,
        }
    }

    /// Identifier of the task the event concerns, for logging.
    pub fn task_id(&self) -> &TaskId {
        match self {
            DomainEvent::TaskCreated(task) | DomainEvent::TaskUpdated(task) => &task.id,
            DomainEvent::CommentCreated { task_id, .. } => task_id,
        }
    }

    /// Decodes a broker message body as the given kind.
    pub fn decode(kind: EventKind, body: &[u8]) -> Result<Self, DomainError> {
        let envelope: EventEnvelope =
            serde_json::from_slice(body).map_err(|e| malformed(kind, e))?;

        match kind {
            EventKind::TaskCreated => serde_json::from_value(envelope.data)
                .map(DomainEvent::TaskCreated)
                .map_err(|e| malformed(kind, e)),
            EventKind::TaskUpdated => serde_json::from_value(envelope.data)
                .map(DomainEvent::TaskUpdated)
                .map_err(|e| malformed(kind, e)),
            EventKind::CommentCreated => serde_json::from_value::<CommentCreatedData>(envelope.data)
                .map(|d| DomainEvent::CommentCreated {
                    task_id: d.task_id,
                    comment: d.comment,
                })
                .map_err(|e| malformed(kind, e)),
        }
    }

    /// Wraps this event in the broker envelope.
    pub fn to_envelope(&self) -> Result<EventEnvelope, serde_json::Error> {
        let data = match self {
            DomainEvent::TaskCreated(task) | DomainEvent::TaskUpdated(task) => {
                serde_json::to_value(task)?
            }
            DomainEvent::CommentCreated { task_id, comment } => {
                serde_json::to_value(CommentCreatedData {
                    task_id: task_id.clone(),
                    comment: comment.clone(),
                })?
            }
        };
        Ok(EventEnvelope {
            pattern: Some(self.kind().routing_key().to_string()),
            data,
        })
    }

    /// Serializes this event into a broker message body.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.to_envelope()?)
    }
}

fn malformed(kind: EventKind, err: serde_json::Error) -> DomainError {
    DomainError::new(ErrorCode::MalformedEvent, format!("Malformed {} payload", kind))
        .with_detail("reason", err.to_string())
}
