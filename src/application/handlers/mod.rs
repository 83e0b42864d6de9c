//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations, plus the
//! event handlers the broker consumer dispatches to.

pub mod notification;

pub use notification::{
    DeleteNotificationCommand, DeleteNotificationHandler, GetUnreadCountHandler,
    GetUnreadCountQuery, ListNotificationsHandler, ListNotificationsQuery, MarkAllReadCommand,
    MarkAllReadHandler, MarkNotificationReadCommand, MarkNotificationReadHandler,
    NotificationFanOut,
};
