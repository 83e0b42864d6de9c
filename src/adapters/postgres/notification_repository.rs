//! PostgreSQL implementation of NotificationRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, NotificationId, Timestamp, UserId};
use crate::domain::notification::{Notification, NotificationStatus, NotificationType};
use crate::ports::{NotificationRepository, Page, PageRequest};

/// PostgreSQL implementation of NotificationRepository.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn save_all(&self, notifications: &[Notification]) -> Result<(), DomainError> {
        if notifications.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        for n in notifications {
            sqlx::query(
                r#"
                INSERT INTO notifications (
                    id, notification_type, title, message, data, status,
                    recipient_id, created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(n.id.as_uuid())
            .bind(n.notification_type.as_str())
            .bind(&n.title)
            .bind(&n.message)
            .bind(&n.data)
            .bind(n.status.as_str())
            .bind(n.recipient_id.as_str())
            .bind(n.created_at.as_datetime())
            .bind(n.updated_at.as_datetime())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to insert notification", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn find_for_recipient(
        &self,
        recipient: &UserId,
        page: PageRequest,
    ) -> Result<Page<Notification>, DomainError> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM notifications WHERE recipient_id = $1")
                .bind(recipient.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count notifications", e))?;

        let rows: Vec<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, notification_type, title, message, data, status,
                   recipient_id, created_at, updated_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(recipient.as_str())
        .bind(page.size as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch notifications", e))?;

        let data = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(data, total.max(0) as u64, page))
    }

    async fn find_owned(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<Option<Notification>, DomainError> {
        let row: Option<NotificationRow> = sqlx::query_as(
            r#"
            SELECT id, notification_type, title, message, data, status,
                   recipient_id, created_at, updated_at
            FROM notifications
            WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(recipient.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch notification", e))?;

        row.map(Notification::try_from).transpose()
    }

    async fn update(&self, notification: &Notification) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET
                status = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.status.as_str())
        .bind(notification.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update notification", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotificationNotFound,
                format!("Notification not found: {}", notification.id),
            ));
        }

        Ok(())
    }

    async fn mark_all_read(&self, recipient: &UserId) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET
                status = 'READ',
                updated_at = $2
            WHERE recipient_id = $1 AND status = 'UNREAD'
            "#,
        )
        .bind(recipient.as_str())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to mark notifications read", e))?;

        Ok(result.rows_affected())
    }

    async fn count_unread(&self, recipient: &UserId) -> Result<u64, DomainError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND status = 'UNREAD'",
        )
        .bind(recipient.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count unread notifications", e))?;

        Ok(count.max(0) as u64)
    }

    async fn delete_owned(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient_id = $2")
            .bind(id.as_uuid())
            .bind(recipient.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete notification", e))?;

        Ok(result.rows_affected() > 0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Row mapping
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, sqlx::FromRow)]
struct NotificationRow {
    id: uuid::Uuid,
    notification_type: String,
    title: String,
    message: String,
    data: serde_json::Value,
    status: String,
    recipient_id: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = DomainError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let notification_type: NotificationType = row.notification_type.parse().map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid notification_type: {}", e),
            )
        })?;

        let status: NotificationStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid status: {}", e))
        })?;

        let recipient_id = UserId::new(row.recipient_id).map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid recipient_id: {}", e),
            )
        })?;

        Ok(Notification {
            id: NotificationId::from_uuid(row.id),
            notification_type,
            title: row.title,
            message: row.message,
            data: row.data,
            status,
            recipient_id,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}
