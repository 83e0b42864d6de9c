//! Recipient selection and message templates.
//!
//! Pure functions from a task event to the notifications it should produce.
//! Recipient lists keep first-seen order and never contain duplicates.

use serde_json::{json, Value as JsonValue};

use crate::domain::foundation::UserId;
use crate::domain::task::{DomainEvent, EventKind, TaskSnapshot};

use super::{Notification, NotificationType};

/// The notifications one event turns into, before ids are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPlan {
    pub kind: EventKind,
    pub title: String,
    pub message: String,
    pub data: JsonValue,
    pub recipients: Vec<UserId>,
}

impl NotificationPlan {
    /// Builds the plan for an event, or `None` when nobody should be notified.
    pub fn for_event(event: &DomainEvent) -> Option<Self> {
        let plan = match event {
            DomainEvent::TaskCreated(task) => Self {
                kind: EventKind::TaskCreated,
                title: "New task assigned".to_string(),
                message: format!("You were assigned to task: {}", task.title),
                data: json!({
                    "taskId": task.id,
                    "taskTitle": task.title,
                    "taskPriority": task.priority,
                }),
                recipients: assignees(task),
            },
            DomainEvent::TaskUpdated(task) => Self {
                kind: EventKind::TaskUpdated,
                title: "Task updated".to_string(),
                message: format!("Task \"{}\" was updated", task.title),
                data: json!({
                    "taskId": task.id,
                    "taskTitle": task.title,
                    "taskStatus": task.status,
                }),
                recipients: assignees_and_creator(task),
            },
            DomainEvent::CommentCreated { comment, .. } => {
                let task = comment.task.as_ref()?;
                let author = comment.author.as_ref();
                let recipients = assignees_and_creator(task)
                    .into_iter()
                    .filter(|id| author.map_or(true, |a| &a.id != id))
                    .collect();
                Self {
                    kind: EventKind::CommentCreated,
                    title: "New comment".to_string(),
                    message: format!("New comment on task \"{}\"", task.title),
                    data: json!({
                        "taskId": task.id,
                        "taskTitle": task.title,
                        "commentId": comment.id,
                        "commentAuthor": author.and_then(|a| a.username.clone()),
                    }),
                    recipients,
                }
            }
        };

        if plan.recipients.is_empty() {
            None
        } else {
            Some(plan)
        }
    }

    pub fn notification_type(&self) -> NotificationType {
        self.kind.into()
    }

    /// Materializes one unread notification per recipient.
    pub fn to_notifications(&self) -> Vec<Notification> {
        self.recipients
            .iter()
            .map(|recipient| {
                Notification::new(
                    recipient.clone(),
                    self.notification_type(),
                    self.title.clone(),
                    self.message.clone(),
                    self.data.clone(),
                )
            })
            .collect()
    }
}

fn push_unique(ids: &mut Vec<UserId>, id: &UserId) {
    if !ids.contains(id) {
        ids.push(id.clone());
    }
}

fn assignees(task: &TaskSnapshot) -> Vec<UserId> {
    let mut ids = Vec::with_capacity(task.assigned_users.len());
    for user in &task.assigned_users {
        push_unique(&mut ids, &user.id);
    }
    ids
}

fn assignees_and_creator(task: &TaskSnapshot) -> Vec<UserId> {
    let mut ids = assignees(task);
    if let Some(creator) = &task.created_by {
        push_unique(&mut ids, &creator.id);
    }
    ids
}
