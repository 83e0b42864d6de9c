//! Event bus consumer.
//!
//! - [`dispatcher`] - decode, handle and ack/reject decisions
//! - [`amqp_consumer`] - RabbitMQ transport with supervised reconnects
//! - [`in_memory`] - broker stand-in for tests and local runs
//! - [`topology`] - exchange and queue names
//! - [`backoff`] - reconnect delays

pub mod amqp_consumer;
pub mod backoff;
pub mod dispatcher;
pub mod in_memory;
pub mod topology;

pub use amqp_consumer::{AmqpConsumerConfig, AmqpEventConsumer, BrokerError};
pub use backoff::ReconnectPolicy;
pub use dispatcher::{Disposition, EventDispatcher};
pub use in_memory::InMemoryEventBus;
pub use topology::{QueueBinding, Topology, DEFAULT_EXCHANGE};
