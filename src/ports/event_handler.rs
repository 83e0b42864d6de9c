//! EventHandler port - Interface for processing consumed task events.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::task::DomainEvent;

/// Handler for processing task events taken off a queue.
///
/// An `Err` result means the message is rejected without requeue, so
/// handlers should only fail for conditions a redelivery would not fix
/// or that must not be silently acknowledged.
///
/// # Example
///
/// ```ignore
/// struct AuditLog { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for AuditLog {
///     async fn handle(&self, event: DomainEvent) -> Result<(), DomainError> {
///         tracing::info!(task_id = %event.task_id(), "task event");
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "AuditLog"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: DomainEvent) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}
