//! ListNotificationsHandler - Query handler for a recipient's notifications.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::notification::Notification;
use crate::ports::{NotificationRepository, Page, PageRequest};

/// Query for one page of the caller's notifications, newest first.
#[derive(Debug, Clone)]
pub struct ListNotificationsQuery {
    pub user_id: UserId,
    pub page: PageRequest,
}

impl ListNotificationsQuery {
    pub fn first_page(user_id: UserId) -> Self {
        Self {
            user_id,
            page: PageRequest::default(),
        }
    }
}

pub struct ListNotificationsHandler {
    repository: Arc<dyn NotificationRepository>,
}

impl ListNotificationsHandler {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListNotificationsQuery,
    ) -> Result<Page<Notification>, DomainError> {
        self.repository
            .find_for_recipient(&query.user_id, query.page)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryNotificationRepository;
    use crate::domain::notification::NotificationType;
    use serde_json::json;

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    async fn seeded(user: &str, count: usize) -> InMemoryNotificationRepository {
        let repo = InMemoryNotificationRepository::new();
        let batch: Vec<_> = (0..count)
            .map(|i| {
                Notification::new(
                    uid(user),
                    NotificationType::TaskCreated,
                    "New task assigned",
                    format!("You were assigned to task: T{}", i),
                    json!({}),
                )
            })
            .collect();
        repo.save_all(&batch).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn lists_first_page_with_defaults() {
        let repo = seeded("a", 12).await;
        let handler = ListNotificationsHandler::new(Arc::new(repo));

        let page = handler
            .handle(ListNotificationsQuery::first_page(uid("a")))
            .await
            .unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 1);
    }

    #[tokio::test]
    async fn returns_only_callers_notifications() {
        let repo = seeded("a", 3).await;
        let handler = ListNotificationsHandler::new(Arc::new(repo));

        let page = handler
            .handle(ListNotificationsQuery::first_page(uid("b")))
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
    }
}
