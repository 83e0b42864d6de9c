//! Notification domain module.
//!
//! # Module Structure
//!
//! - `aggregate` - Notification entity
//! - `kind` - NotificationType and NotificationStatus
//! - `plan` - Recipient selection and templates per event kind

mod aggregate;
mod kind;
mod plan;

pub use aggregate::Notification;
pub use kind::{NotificationStatus, NotificationType};
pub use plan::NotificationPlan;
