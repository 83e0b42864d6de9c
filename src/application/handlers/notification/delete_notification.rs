//! DeleteNotificationHandler - Command handler for removing one notification.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::ports::NotificationRepository;

use super::mark_read::not_found;

#[derive(Debug, Clone)]
pub struct DeleteNotificationCommand {
    pub notification_id: NotificationId,
    pub user_id: UserId,
}

pub struct DeleteNotificationHandler {
    repository: Arc<dyn NotificationRepository>,
}

impl DeleteNotificationHandler {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `NotificationNotFound` if it does not exist or belongs to someone else
    pub async fn handle(&self, cmd: DeleteNotificationCommand) -> Result<(), DomainError> {
        let deleted = self
            .repository
            .delete_owned(&cmd.notification_id, &cmd.user_id)
            .await?;

        if !deleted {
            return Err(not_found(&cmd.notification_id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNotificationRepository;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::notification::{Notification, NotificationType};
    use serde_json::json;

    #[tokio::test]
    async fn deletes_only_when_owned() {
        let owner = UserId::new("a").unwrap();
        let repo = InMemoryNotificationRepository::new();
        let n = Notification::new(
            owner.clone(),
            NotificationType::TaskCreated,
            "New task assigned",
            "You were assigned to task: Docs",
            json!({}),
        );
        let id = n.id;
        repo.save_all(&[n]).await.unwrap();
        let handler = DeleteNotificationHandler::new(Arc::new(repo.clone()));

        let err = handler
            .handle(DeleteNotificationCommand {
                notification_id: id,
                user_id: UserId::new("b").unwrap(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotificationNotFound);
        assert_eq!(repo.len().await, 1);

        handler
            .handle(DeleteNotificationCommand {
                notification_id: id,
                user_id: owner,
            })
            .await
            .unwrap();
        assert!(repo.is_empty().await);
    }
}
