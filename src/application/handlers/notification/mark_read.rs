//! MarkNotificationReadHandler - Command handler for reading one notification.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::Notification;
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct MarkNotificationReadCommand {
    pub notification_id: NotificationId,
    pub user_id: UserId,
}

pub struct MarkNotificationReadHandler {
    repository: Arc<dyn NotificationRepository>,
}

impl MarkNotificationReadHandler {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Returns the notification as it now stands.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if it does not exist or belongs to someone else
    pub async fn handle(
        &self,
        cmd: MarkNotificationReadCommand,
    ) -> Result<Notification, DomainError> {
        // 1. Load, scoped to the caller
        let mut notification = self
            .repository
            .find_owned(&cmd.notification_id, &cmd.user_id)
            .await?
            .ok_or_else(|| not_found(&cmd.notification_id))?;

        // 2. Apply; already-read notifications are returned untouched
        if notification.mark_read() {
            self.repository.update(&notification).await?;
        }

        Ok(notification)
    }
}

pub(super) fn not_found(id: &NotificationId) -> DomainError {
    DomainError::new(
        ErrorCode::NotificationNotFound,
        format!("Notification not found: {}", id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNotificationRepository;
    use crate::domain::notification::{NotificationStatus, NotificationType};
    use serde_json::json;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn setup() -> (MarkNotificationReadHandler, InMemoryNotificationRepository, NotificationId) {
        let repo = InMemoryNotificationRepository::new();
        let n = Notification::new(
            uid("a"),
            NotificationType::CommentCreated,
            "New comment",
            "New comment on task \"Docs\"",
            json!({}),
        );
        let id = n.id;
        repo.save_all(&[n]).await.unwrap();
        (MarkNotificationReadHandler::new(Arc::new(repo.clone())), repo, id)
    }

    #[tokio::test]
    async fn marks_owned_notification_read() {
        let (handler, repo, id) = setup().await;

        let updated = handler
            .handle(MarkNotificationReadCommand {
                notification_id: id,
                user_id: uid("a"),
            })
            .await
            .unwrap();

        assert_eq!(updated.status, NotificationStatus::Read);
        assert_eq!(repo.all().await[0].status, NotificationStatus::Read);
    }

    #[tokio::test]
    async fn other_users_notification_is_not_found() {
        let (handler, repo, id) = setup().await;

        let err = handler
            .handle(MarkNotificationReadCommand {
                notification_id: id,
                user_id: uid("b"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotificationNotFound);
        assert_eq!(repo.all().await[0].status, NotificationStatus::Unread);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (handler, _, _) = setup().await;

        let err = handler
            .handle(MarkNotificationReadCommand {
                notification_id: NotificationId::new(),
                user_id: uid("a"),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotificationNotFound);
    }

    #[tokio::test]
    async fn marking_twice_is_harmless() {
        let (handler, _, id) = setup().await;
        let cmd = MarkNotificationReadCommand {
            notification_id: id,
            user_id: uid("a"),
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert_eq!(first.updated_at, second.updated_at);
    }
}
