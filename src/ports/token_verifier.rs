//! Token verification port.
//!
//! Verifies a raw access token and returns its claims. The realtime gateway
//! uses it during the socket handshake; the HTTP auth middleware uses it for
//! Bearer tokens.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, VerifiedClaims};

/// Verifies access tokens.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::TokenExpired` when the signature is valid but the
///   token is past expiry, and only then
/// - Return `AuthError::InvalidToken` for anything else wrong with the token
/// - Leave `subject` as `None` instead of failing when `sub` is absent
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a token (without any "Bearer " prefix).
    async fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Simple map-backed implementation for exercising the trait
    struct TableVerifier {
        tokens: HashMap<String, Result<VerifiedClaims, AuthError>>,
    }

    #[async_trait]
    impl TokenVerifier for TableVerifier {
        async fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
            self.tokens
                .get(token)
                .cloned()
                .unwrap_or(Err(AuthError::InvalidToken))
        }
    }

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn TokenVerifier) {}

    #[tokio::test]
    async fn unknown_tokens_are_invalid() {
        let verifier = TableVerifier {
            tokens: HashMap::from([(
                "good".to_string(),
                Ok(VerifiedClaims::new(Some("u-1".to_string()))),
            )]),
        };

        assert!(verifier.verify("good").await.is_ok());
        assert_eq!(verifier.verify("bad").await, Err(AuthError::InvalidToken));
    }
}
