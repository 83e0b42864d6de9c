//! HTTP routes for notification endpoints.

use axum::{
    routing::{delete, get, patch},
    Router,
};

use super::handlers::{
    delete_notification, health, list_notifications, mark_all_read, mark_read, unread_count,
    NotificationHandlers,
};

/// Creates the notification router. Mount under `/notifications`.
pub fn notification_routes(handlers: NotificationHandlers) -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/health", get(health))
        .route("/unread-count", get(unread_count))
        .route("/mark-all-read", patch(mark_all_read))
        .route("/:id/read", patch(mark_read))
        .route("/:id", delete(delete_notification))
        .with_state(handlers)
}
