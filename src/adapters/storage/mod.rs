//! Storage Adapters
//!
//! - **InMemoryNotificationRepository** - Notifications held in memory (tests, local runs)

mod in_memory_notification_repository;

pub use in_memory_notification_repository::InMemoryNotificationRepository;
