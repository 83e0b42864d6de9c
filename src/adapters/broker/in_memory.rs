//! In-memory event bus for testing.
//!
//! Stands in for the broker: publishing encodes the event exactly as a
//! producer would, then runs it through the same dispatcher the AMQP
//! consumer uses. Delivery is synchronous and deterministic.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::task::{DomainEvent, EventKind};
use crate::ports::EventPublisher;

use super::dispatcher::{Disposition, EventDispatcher};

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = InMemoryEventBus::new(dispatcher);
/// bus.publish(event).await?;
/// assert_eq!(bus.acked_count(), 1);
/// ```
pub struct InMemoryEventBus {
    dispatcher: EventDispatcher,
    deliveries: RwLock<Vec<(EventKind, Disposition)>>,
}

impl InMemoryEventBus {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self {
            dispatcher,
            deliveries: RwLock::new(Vec::new()),
        }
    }

    /// Deliver a raw body as if it arrived on `kind`'s queue.
    pub async fn publish_raw(&self, kind: EventKind, body: &[u8]) -> Disposition {
        let disposition = self.dispatcher.dispatch(kind, body).await;
        self.deliveries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((kind, disposition));
        disposition
    }

    // === Test Helpers ===

    /// Every delivery so far, in order.
    pub fn deliveries(&self) -> Vec<(EventKind, Disposition)> {
        self.deliveries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn acked_count(&self) -> usize {
        self.count(Disposition::Ack)
    }

    pub fn rejected_count(&self) -> usize {
        self.count(Disposition::Reject)
    }

    fn count(&self, wanted: Disposition) -> usize {
        self.deliveries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(_, d)| *d == wanted)
            .count()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    /// Publishing succeeds once the message is "on the queue", whatever the
    /// consumer later decides, matching broker semantics.
    async fn publish(&self, event: DomainEvent) -> Result<(), DomainError> {
        let body = event
            .encode()
            .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))?;
        self.publish_raw(event.kind(), &body).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::TaskSnapshot;
    use crate::ports::EventHandler;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Failing;

    #[async_trait]
    impl EventHandler for Failing {
        async fn handle(&self, _event: DomainEvent) -> Result<(), DomainError> {
            Err(DomainError::new(ErrorCode::DatabaseError, "down"))
        }

        fn name(&self) -> &'static str {
            "Failing"
        }
    }

    #[tokio::test]
    async fn publish_records_ack() {
        let bus = InMemoryEventBus::new(EventDispatcher::new());

        bus.publish(DomainEvent::TaskCreated(TaskSnapshot::new("t-1", "Docs")))
            .await
            .unwrap();

        assert_eq!(bus.deliveries(), vec![(EventKind::TaskCreated, Disposition::Ack)]);
    }

    #[tokio::test]
    async fn handler_failure_is_recorded_as_reject_not_publish_error() {
        let dispatcher = EventDispatcher::new().subscribe(EventKind::TaskUpdated, Arc::new(Failing));
        let bus = InMemoryEventBus::new(dispatcher);

        let result = bus
            .publish(DomainEvent::TaskUpdated(TaskSnapshot::new("t-1", "Docs")))
            .await;

        assert!(result.is_ok());
        assert_eq!(bus.rejected_count(), 1);
        assert_eq!(bus.acked_count(), 0);
    }

    #[tokio::test]
    async fn raw_garbage_is_rejected() {
        let bus = InMemoryEventBus::new(EventDispatcher::new());
        assert_eq!(
            bus.publish_raw(EventKind::CommentCreated, b"[]").await,
            Disposition::Reject
        );
    }
}
