//! Notification command, query and event handlers.

mod delete_notification;
mod fan_out;
mod get_unread_count;
mod list_notifications;
mod mark_all_read;
mod mark_read;

pub use delete_notification::{DeleteNotificationCommand, DeleteNotificationHandler};
pub use fan_out::NotificationFanOut;
pub use get_unread_count::{GetUnreadCountHandler, GetUnreadCountQuery};
pub use list_notifications::{ListNotificationsHandler, ListNotificationsQuery};
pub use mark_all_read::{MarkAllReadCommand, MarkAllReadHandler};
pub use mark_read::{MarkNotificationReadCommand, MarkNotificationReadHandler};
