//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `auth` - Access-token verification
//! - `broker` - AMQP consumer, event dispatch, in-memory bus
//! - `delivery` - Bridge from the worker to the gateway ingress
//! - `http` - Axum routes for the read API and the push ingress
//! - `postgres` / `storage` - Notification persistence
//! - `websocket` - Realtime gateway, session registry, rooms

pub mod auth;
pub mod broker;
pub mod delivery;
pub mod http;
pub mod postgres;
pub mod storage;
pub mod websocket;
