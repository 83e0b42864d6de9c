//! Task Notifier - cross-service notification delivery for a task tracker.
//!
//! Task events arrive over AMQP, are turned into per-recipient notifications,
//! persisted, and pushed to connected browser sessions through a separate
//! realtime gateway process.
//!
//! Two binaries are built from this crate:
//! - `realtime-gateway` - WebSocket endpoint, session registry, push ingress
//! - `notification-worker` - event consumer, fan-out, delivery bridge, read API

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
