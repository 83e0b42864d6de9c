//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `task` - Task and comment events as published by the task service
//! - `notification` - Notification entity and recipient rules
//! - `realtime` - Credential fingerprints and push event naming

pub mod foundation;
pub mod notification;
pub mod realtime;
pub mod task;
