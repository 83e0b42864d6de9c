//! Message dispatch shared by every consumer transport.
//!
//! Decodes a message body as the kind bound to its queue, runs the
//! subscribed handlers and decides whether the message is acknowledged or
//! rejected. The AMQP consumer and the in-memory bus both go through here.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::task::{DomainEvent, EventKind};
use crate::ports::EventHandler;

/// What to tell the broker about a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Handled; remove from the queue.
    Ack,
    /// Failed; drop without requeue.
    Reject,
}

/// Routes decoded events to handlers by kind.
///
/// Handlers are registered before consumption starts and never change
/// afterwards, so dispatch takes no locks.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to one kind.
    pub fn subscribe(mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.entry(kind).or_default().push(handler);
        self
    }

    /// Subscribe the same handler to several kinds.
    pub fn subscribe_all(mut self, kinds: &[EventKind], handler: Arc<dyn EventHandler>) -> Self {
        for kind in kinds {
            self.handlers
                .entry(*kind)
                .or_default()
                .push(handler.clone());
        }
        self
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map(Vec::len).unwrap_or(0)
    }

    /// Decode and handle one message body.
    ///
    /// Every subscribed handler runs even if an earlier one failed; any
    /// failure rejects the message.
    pub async fn dispatch(&self, kind: EventKind, body: &[u8]) -> Disposition {
        let event = match DomainEvent::decode(kind, body) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(event_kind = %kind, error = %e, "Dropping malformed message");
                return Disposition::Reject;
            }
        };

        tracing::info!(event_kind = %kind, task_id = %event.task_id(), "Received task event");

        let handlers = match self.handlers.get(&kind) {
            Some(handlers) => handlers,
            None => {
                tracing::debug!(event_kind = %kind, "No handlers subscribed");
                return Disposition::Ack;
            }
        };

        let mut errors = Vec::new();
        for handler in handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if errors.is_empty() {
            Disposition::Ack
        } else {
            tracing::error!(
                event_kind = %kind,
                task_id = %event.task_id(),
                errors = %errors.join(", "),
                "Event handling failed, rejecting message"
            );
            Disposition::Reject
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::task::TaskSnapshot;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingHandler {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _event: DomainEvent) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DomainError::new(ErrorCode::DatabaseError, "down"))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    fn body() -> Vec<u8> {
        DomainEvent::TaskCreated(TaskSnapshot::new("t-1", "Docs"))
            .encode()
            .unwrap()
    }

    #[tokio::test]
    async fn successful_handling_acks() {
        let handler = CountingHandler::new(false);
        let dispatcher = EventDispatcher::new().subscribe(EventKind::TaskCreated, handler.clone());

        assert_eq!(
            dispatcher.dispatch(EventKind::TaskCreated, &body()).await,
            Disposition::Ack
        );
        assert_eq!(handler.calls(), 1);
    }

    #[tokio::test]
    async fn malformed_body_rejects_without_calling_handlers() {
        let handler = CountingHandler::new(false);
        let dispatcher = EventDispatcher::new().subscribe(EventKind::TaskCreated, handler.clone());

        assert_eq!(
            dispatcher.dispatch(EventKind::TaskCreated, b"{oops").await,
            Disposition::Reject
        );
        assert_eq!(handler.calls(), 0);
    }

    #[tokio::test]
    async fn handler_failure_rejects_but_runs_all_handlers() {
        let failing = CountingHandler::new(true);
        let healthy = CountingHandler::new(false);
        let dispatcher = EventDispatcher::new()
            .subscribe(EventKind::TaskCreated, failing.clone())
            .subscribe(EventKind::TaskCreated, healthy.clone());

        assert_eq!(
            dispatcher.dispatch(EventKind::TaskCreated, &body()).await,
            Disposition::Reject
        );
        assert_eq!(failing.calls(), 1);
        assert_eq!(healthy.calls(), 1);
    }

    #[tokio::test]
    async fn unsubscribed_kind_acks() {
        let dispatcher = EventDispatcher::new();
        assert_eq!(
            dispatcher.dispatch(EventKind::TaskCreated, &body()).await,
            Disposition::Ack
        );
    }

    #[test]
    fn subscribe_all_registers_each_kind() {
        let handler = CountingHandler::new(false);
        let dispatcher = EventDispatcher::new().subscribe_all(&EventKind::ALL, handler);
        for kind in EventKind::ALL {
            assert_eq!(dispatcher.handler_count(kind), 1);
        }
    }
}
