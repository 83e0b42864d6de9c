//! GetUnreadCountHandler - Query handler for the caller's unread badge.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct GetUnreadCountQuery {
    pub user_id: UserId,
}

pub struct GetUnreadCountHandler {
    repository: Arc<dyn NotificationRepository>,
}

impl GetUnreadCountHandler {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetUnreadCountQuery) -> Result<u64, DomainError> {
        self.repository.count_unread(&query.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNotificationRepository;
    use crate::domain::notification::{Notification, NotificationType};
    use serde_json::json;

    #[tokio::test]
    async fn counts_unread_only() {
        let user = UserId::new("a").unwrap();
        let repo = InMemoryNotificationRepository::new();
        let mut read = Notification::new(
            user.clone(),
            NotificationType::TaskUpdated,
            "Task updated",
            "Task \"Docs\" was updated",
            json!({}),
        );
        read.mark_read();
        let unread = Notification::new(
            user.clone(),
            NotificationType::TaskUpdated,
            "Task updated",
            "Task \"Docs\" was updated",
            json!({}),
        );
        repo.save_all(&[read, unread]).await.unwrap();

        let handler = GetUnreadCountHandler::new(Arc::new(repo));
        let count = handler
            .handle(GetUnreadCountQuery { user_id: user })
            .await
            .unwrap();

        assert_eq!(count, 1);
    }
}
