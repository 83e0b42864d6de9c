//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Publishing task events onto the exchange
//! - `EventHandler` - Handler that processes consumed events
//!
//! ## Notification Ports
//!
//! - `NotificationRepository` - Persistence and recipient-scoped queries
//! - `NotificationDelivery` - Hand-off to the realtime gateway
//!
//! ## Auth Ports
//!
//! - `TokenVerifier` - Access token verification

mod event_handler;
mod event_publisher;
mod notification_delivery;
mod notification_repository;
mod token_verifier;

pub use event_handler::EventHandler;
pub use event_publisher::EventPublisher;
pub use notification_delivery::{DeliveryError, DeliveryReport, NotificationDelivery};
pub use notification_repository::{
    NotificationRepository, Page, PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use token_verifier::TokenVerifier;
