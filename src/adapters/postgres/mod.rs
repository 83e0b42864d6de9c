//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresNotificationRepository` - Notification store used by the worker

mod notification_repository;

pub use notification_repository::PostgresNotificationRepository;
