//! In-Memory Notification Repository
//!
//! Keeps notifications in a vector. Useful for tests and local runs without
//! Postgres.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, UserId};
use crate::domain::notification::{Notification, NotificationStatus};
use crate::ports::{NotificationRepository, Page, PageRequest};

#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with `DatabaseError`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything stored, in insertion order.
    pub async fn all(&self) -> Vec<Notification> {
        self.notifications.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.notifications.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notifications.read().await.is_empty()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Simulated write failure",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn save_all(&self, notifications: &[Notification]) -> Result<(), DomainError> {
        self.check_writable()?;
        self.notifications
            .write()
            .await
            .extend(notifications.iter().cloned());
        Ok(())
    }

    async fn find_for_recipient(
        &self,
        recipient: &UserId,
        page: PageRequest,
    ) -> Result<Page<Notification>, DomainError> {
        let store = self.notifications.read().await;

        // Newest first; later inserts win ties.
        let mut owned: Vec<&Notification> = store
            .iter()
            .rev()
            .filter(|n| n.is_owned_by(recipient))
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = owned.len() as u64;
        let data = owned
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(data, total, page))
    }

    async fn find_owned(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<Option<Notification>, DomainError> {
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .find(|n| &n.id == id && n.is_owned_by(recipient))
            .cloned())
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut store = self.notifications.write().await;
        match store.iter_mut().find(|n| n.id == notification.id) {
            Some(existing) => {
                existing.status = notification.status;
                existing.updated_at = notification.updated_at;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id),
            )),
        }
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, DomainError> {
        self.check_writable()?;
        let mut store = self.notifications.write().await;
        let mut updated = 0;
        for n in store
            .iter_mut()
            .filter(|n| n.is_owned_by(recipient) && n.status == NotificationStatus::Unread)
        {
            n.mark_read();
            updated += 1;
        }
        Ok(updated)
    }

    async fn count_unread(&self, recipient: &UserId) -> Result<u64, DomainError> {
        Ok(self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| n.is_owned_by(recipient) && n.is_unread())
            .count() as u64)
    }

    async fn delete_owned(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut store = self.notifications.write().await;
        let before = store.len();
        store.retain(|n| !(&n.id == id && n.is_owned_by(recipient)));
        Ok(store.len() < before)
    }
}
