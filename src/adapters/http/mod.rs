//! HTTP adapters - REST API implementations.
//!
//! - `realtime` - Gateway ingress used by the delivery bridge, plus health
//! - `notification` - Authenticated read-side API served by the worker
//! - `middleware` - Bearer token authentication
//! - `cors` - CORS layer shared by both binaries

mod cors;
pub mod middleware;
pub mod notification;
pub mod realtime;

pub use cors::cors_layer;
pub use notification::{notification_routes, NotificationHandlers};
pub use realtime::realtime_routes;
