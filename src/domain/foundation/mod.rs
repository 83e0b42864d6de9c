//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the notification pipeline.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, VerifiedClaims};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConnectionId, NotificationId, TaskId, UserId};
pub use timestamp::Timestamp;
