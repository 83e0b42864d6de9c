//! MarkAllReadHandler - Command handler for clearing the caller's unread set.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::NotificationRepository;

#[derive(Debug, Clone)]
pub struct MarkAllReadCommand {
    pub user_id: UserId,
}

pub struct MarkAllReadHandler {
    repository: Arc<dyn NotificationRepository>,
}

impl MarkAllReadHandler {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self { repository }
    }

    /// Returns how many notifications changed.
    pub async fn handle(&self, cmd: MarkAllReadCommand) -> Result<u64, DomainError> {
        let updated = self.repository.mark_all_read(&cmd.user_id).await?;
        tracing::debug!(user_id = %cmd.user_id, updated, "Marked all notifications read");
        Ok(updated)
    }
}
