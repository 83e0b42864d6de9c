//! Authentication types for the domain layer.
//!
//! These types describe the outcome of verifying an access token. They have
//! no dependency on the token format; the `TokenVerifier` port produces them.

use super::UserId;
use thiserror::Error;

/// Claims extracted from a verified access token.
///
/// `subject` is optional at this boundary: a token can carry a valid
/// signature and still omit `sub`, and callers must treat that as malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    pub subject: Option<String>,
    pub username: Option<String>,
}

impl VerifiedClaims {
    pub fn new(subject: Option<String>) -> Self {
        Self {
            subject,
            username: None,
        }
    }

    /// Returns the user the token was issued to, if the subject is usable.
    pub fn user_id(&self) -> Option<UserId> {
        self.subject
            .as_deref()
            .and_then(|sub| UserId::new(sub).ok())
    }
}

/// Authenticated user extracted from a validated token.
///
/// Inserted into request extensions by the HTTP auth middleware.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the token subject.
    pub id: UserId,

    /// Username claim if the issuer provided one.
    pub username: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, username: Option<String>) -> Self {
        Self { id, username }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid token")]
    InvalidToken,

    /// The token signature is fine but it is past its expiry.
    #[error("Token expired")]
    TokenExpired,

    /// The token verified but carries no subject.
    #[error("Token has no subject")]
    MissingSubject,
}

impl AuthError {
    /// Returns true if this error should be remembered in the rejection cache.
    pub fn is_expiry(&self) -> bool {
        matches!(self, AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_user_id_requires_non_empty_subject() {
        assert_eq!(
            VerifiedClaims::new(Some("u-1".into())).user_id(),
            Some(UserId::new("u-1").unwrap())
        );
        assert_eq!(VerifiedClaims::new(Some(String::new())).user_id(), None);
        assert_eq!(VerifiedClaims::new(None).user_id(), None);
    }

    #[test]
    fn auth_error_token_expired_displays_correctly() {
        assert_eq!(format!("{}", AuthError::TokenExpired), "Token expired");
    }

    #[test]
    fn only_expiry_is_cached() {
        assert!(AuthError::TokenExpired.is_expiry());
        assert!(!AuthError::InvalidToken.is_expiry());
        assert!(!AuthError::MissingSubject.is_expiry());
    }
}
