//! Exchange, queue and binding names for task events.

use crate::domain::task::EventKind;

pub const DEFAULT_EXCHANGE: &str = "task.events";

/// One durable queue bound to the exchange under a single routing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueBinding {
    pub kind: EventKind,
    pub queue: String,
    pub routing_key: &'static str,
}

/// The full set of bindings the consumer declares on every (re)connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    pub exchange: String,
    pub bindings: Vec<QueueBinding>,
}

impl Topology {
    pub fn new(exchange: impl Into<String>) -> Self {
        let bindings = EventKind::ALL
            .iter()
            .map(|kind| QueueBinding {
                kind: *kind,
                queue: kind.queue_name(),
                routing_key: kind.routing_key(),
            })
            .collect();

        Self {
            exchange: exchange.into(),
            bindings,
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new(DEFAULT_EXCHANGE)
    }
}
