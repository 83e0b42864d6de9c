//! HTTP adapter for the notification read-side endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, ListNotificationsParams, MarkAllReadResponse,
    UnreadCountResponse,
};
pub use handlers::NotificationHandlers;
pub use routes::notification_routes;
