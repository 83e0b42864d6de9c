//! HTTP handlers for notification endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::notification::{
    DeleteNotificationCommand, DeleteNotificationHandler, GetUnreadCountHandler,
    GetUnreadCountQuery, ListNotificationsHandler, ListNotificationsQuery, MarkAllReadCommand,
    MarkAllReadHandler, MarkNotificationReadCommand, MarkNotificationReadHandler,
};
use crate::domain::foundation::{DomainError, ErrorCode, NotificationId};
use crate::ports::{NotificationRepository, PageRequest};

use super::dto::{
    ErrorResponse, HealthResponse, ListNotificationsParams, MarkAllReadResponse,
    UnreadCountResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct NotificationHandlers {
    list_handler: Arc<ListNotificationsHandler>,
    unread_handler: Arc<GetUnreadCountHandler>,
    mark_read_handler: Arc<MarkNotificationReadHandler>,
    mark_all_handler: Arc<MarkAllReadHandler>,
    delete_handler: Arc<DeleteNotificationHandler>,
}

impl NotificationHandlers {
    pub fn new(repository: Arc<dyn NotificationRepository>) -> Self {
        Self {
            list_handler: Arc::new(ListNotificationsHandler::new(repository.clone())),
            unread_handler: Arc::new(GetUnreadCountHandler::new(repository.clone())),
            mark_read_handler: Arc::new(MarkNotificationReadHandler::new(repository.clone())),
            mark_all_handler: Arc::new(MarkAllReadHandler::new(repository.clone())),
            delete_handler: Arc::new(DeleteNotificationHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /notifications - Page through the caller's notifications
pub async fn list_notifications(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<ListNotificationsParams>,
) -> Response {
    let query = ListNotificationsQuery {
        user_id: user.id,
        page: PageRequest::new(params.page, params.size),
    };

    match handlers.list_handler.handle(query).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// GET /notifications/unread-count - Unread badge count
pub async fn unread_count(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = GetUnreadCountQuery { user_id: user.id };

    match handlers.unread_handler.handle(query).await {
        Ok(count) => (StatusCode::OK, Json(UnreadCountResponse { count })).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// PATCH /notifications/:id/read - Mark one notification read
pub async fn mark_read(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(notification_id): Path<String>,
) -> Response {
    let notification_id = match notification_id.parse::<NotificationId>() {
        Ok(id) => id,
        Err(_) => return invalid_id(),
    };

    let cmd = MarkNotificationReadCommand {
        notification_id,
        user_id: user.id,
    };

    match handlers.mark_read_handler.handle(cmd).await {
        Ok(notification) => (StatusCode::OK, Json(notification)).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// PATCH /notifications/mark-all-read - Mark every unread notification read
pub async fn mark_all_read(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let cmd = MarkAllReadCommand { user_id: user.id };

    match handlers.mark_all_handler.handle(cmd).await {
        Ok(updated) => (StatusCode::OK, Json(MarkAllReadResponse { updated })).into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// DELETE /notifications/:id - Delete one notification
pub async fn delete_notification(
    State(handlers): State<NotificationHandlers>,
    RequireAuth(user): RequireAuth,
    Path(notification_id): Path<String>,
) -> Response {
    let notification_id = match notification_id.parse::<NotificationId>() {
        Ok(id) => id,
        Err(_) => return invalid_id(),
    };

    let cmd = DeleteNotificationCommand {
        notification_id,
        user_id: user.id,
    };

    match handlers.delete_handler.handle(cmd).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_domain_error(e),
    }
}

/// GET /notifications/health - Liveness check, no auth
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok("notification-worker"))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn invalid_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request("Invalid notification ID")),
    )
        .into_response()
}

fn handle_domain_error(error: DomainError) -> Response {
    let status = match error.code {
        ErrorCode::NotificationNotFound => StatusCode::NOT_FOUND,
        ErrorCode::EmptyField | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        _ => {
            tracing::error!(error = %error, "Notification request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}
