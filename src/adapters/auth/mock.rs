//! Mock token verifier for testing.
//!
//! Maps literal token strings to outcomes and counts how often it was
//! asked, so tests can assert that a throttled handshake never reached
//! the verifier.
//!
//! # Example
//!
//! ```ignore
//! let verifier = MockTokenVerifier::new()
//!     .with_user("valid-token", "user-123")
//!     .with_error("old-token", AuthError::TokenExpired);
//!
//! assert!(verifier.verify("valid-token").await.is_ok());
//! assert_eq!(verifier.call_count(), 1);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, VerifiedClaims};
use crate::ports::TokenVerifier;

/// Mock verifier. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    outcomes: RwLock<HashMap<String, Result<VerifiedClaims, AuthError>>>,
    calls: AtomicUsize,
}

impl MockTokenVerifier {
    /// Creates a new empty mock verifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `token` as belonging to `user_id`.
    pub fn with_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.with_claims(token, VerifiedClaims::new(Some(user_id.into())))
    }

    /// Accepts `token` with arbitrary claims.
    pub fn with_claims(self, token: impl Into<String>, claims: VerifiedClaims) -> Self {
        self.outcomes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), Ok(claims));
        self
    }

    /// Fails `token` with the given error.
    pub fn with_error(self, token: impl Into<String>, error: AuthError) -> Self {
        self.outcomes
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), Err(error));
        self
    }

    /// Number of `verify` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .cloned()
            .unwrap_or(Err(AuthError::InvalidToken))
    }
}
