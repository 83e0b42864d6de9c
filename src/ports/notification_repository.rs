//! Notification repository port.
//!
//! Persists notifications for the fan-out engine and serves the recipient's
//! read-side queries. Every query that takes a `UserId` is scoped to that
//! recipient: another user's notification is indistinguishable from a
//! missing one.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, NotificationId, UserId};
use crate::domain::notification::Notification;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Normalizes raw query values: page below 1 becomes 1, size is clamped
    /// to `1..=MAX_PAGE_SIZE`, and missing values take the defaults.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1).min(u32::MAX as i64) as u32;
        let size = size
            .filter(|s| *s != 0)
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(1, MAX_PAGE_SIZE as i64) as u32;
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the figures a client needs to paginate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        let size = request.size as u64;
        let total_pages = ((total + size - 1) / size).max(1);
        Self {
            data,
            total,
            page: request.page,
            size: request.size,
            total_pages,
        }
    }
}

/// Repository port for notification persistence.
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Persist a batch of new notifications atomically.
    ///
    /// Either every notification is stored or none is.
    async fn save_all(&self, notifications: &[Notification]) -> Result<(), DomainError>;

    /// Newest-first page of a recipient's notifications.
    async fn find_for_recipient(
        &self,
        recipient: &UserId,
        page: PageRequest,
    ) -> Result<Page<Notification>, DomainError>;

    /// Find a notification owned by the given recipient.
    async fn find_owned(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<Option<Notification>, DomainError>;

    /// Write back status and `updated_at` of an existing notification.
    ///
    /// # Errors
    ///
    /// - `NotificationNotFound` if it no longer exists
    async fn update(&self, notification: &Notification) -> Result<(), DomainError>;

    /// Mark every UNREAD notification of a recipient READ. Returns the count.
    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, DomainError>;

    async fn count_unread(&self, recipient: &UserId) -> Result<u64, DomainError>;

    /// Delete a notification owned by the given recipient.
    ///
    /// Returns false if nothing matched.
    async fn delete_owned(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn NotificationRepository) {}

    #[test]
    fn page_request_defaults() {
        let req = PageRequest::new(None, None);
        assert_eq!(req, PageRequest { page: 1, size: 10 });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn page_request_clamps_out_of_range_values() {
        assert_eq!(PageRequest::new(Some(0), Some(500)), PageRequest { page: 1, size: 100 });
        assert_eq!(PageRequest::new(Some(-3), Some(-1)), PageRequest { page: 1, size: 1 });
        assert_eq!(PageRequest::new(Some(3), Some(0)), PageRequest { page: 3, size: 10 });
    }

    #[test]
    fn page_request_offset_skips_previous_pages() {
        assert_eq!(PageRequest::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn total_pages_is_at_least_one() {
        let page: Page<()> = Page::new(vec![], 0, PageRequest::default());
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<()> = Page::new(vec![], 21, PageRequest::new(Some(1), Some(10)));
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_serializes_camel_case() {
        let page: Page<u8> = Page::new(vec![1], 1, PageRequest::default());
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["totalPages"], 1);
        assert_eq!(value["size"], 10);
    }
}
