//! HTTP adapter for the realtime gateway's ingress and health endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{GatewayHealthResponse, MessageResponse, PushNotificationRequest};
pub use routes::realtime_routes;
