//! EventPublisher port - Interface for publishing task events.
//!
//! The notification pipeline only consumes events. Producers (the task
//! service, tests, the in-memory bus) publish through this port without
//! knowing about the underlying transport.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::task::DomainEvent;

/// Port for publishing task events onto the exchange.
///
/// Delivery is at-least-once; consumers may see duplicates.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event under its kind's routing key.
    async fn publish(&self, event: DomainEvent) -> Result<(), DomainError>;
}
