//! Shared-secret JWT verifier.
//!
//! Verifies HS256 access tokens issued by the auth service. Distinguishes
//! expiry from every other failure, and leaves a missing `sub` for the
//! caller to reject.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{AuthError, VerifiedClaims};
use crate::ports::TokenVerifier;

/// Claims read from access tokens. Anything else in the token is ignored.
#[derive(Debug, Deserialize)]
struct AccessClaims {
    #[serde(default)]
    sub: Option<String>,

    #[serde(default)]
    username: Option<String>,
}

/// `TokenVerifier` backed by a symmetric signing secret.
pub struct JwtTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Create a verifier for tokens signed with `secret`.
    ///
    /// `leeway_secs` is the clock skew tolerated on `exp`. Tokens without
    /// `exp` never expire.
    pub fn new(secret: &SecretString, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = leeway_secs;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::debug!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            },
        )?;

        Ok(VerifiedClaims {
            subject: data.claims.sub,
            username: data.claims.username,
        })
    }
}

impl std::fmt::Debug for JwtTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenVerifier")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    const SECRET: &str = "test-secret";

    #[derive(Serialize)]
    struct TestClaims<'a> {
        #[serde(skip_serializing_if = "Option::is_none")]
        sub: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        exp: Option<u64>,
    }

    fn now() -> u64 {
        chrono::Utc::now().timestamp() as u64
    }

    fn sign(claims: &TestClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier() -> JwtTokenVerifier {
        JwtTokenVerifier::new(&SecretString::new(SECRET.to_string()), 0)
    }

    #[tokio::test]
    async fn valid_token_yields_subject() {
        let token = sign(
            &TestClaims {
                sub: Some("user-1"),
                exp: Some(now() + 3600),
            },
            SECRET,
        );

        let claims = verifier().verify(&token).await.unwrap();

        assert_eq!(claims.subject.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let token = sign(
            &TestClaims {
                sub: Some("user-1"),
                exp: Some(now() - 3600),
            },
            SECRET,
        );

        assert_eq!(verifier().verify(&token).await, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let token = sign(
            &TestClaims {
                sub: Some("user-1"),
                exp: Some(now() + 3600),
            },
            "other-secret",
        );

        assert_eq!(verifier().verify(&token).await, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        assert_eq!(
            verifier().verify("not.a.jwt").await,
            Err(AuthError::InvalidToken)
        );
    }

    #[tokio::test]
    async fn missing_subject_is_not_an_error_here() {
        let token = sign(
            &TestClaims {
                sub: None,
                exp: Some(now() + 3600),
            },
            SECRET,
        );

        let claims = verifier().verify(&token).await.unwrap();

        assert_eq!(claims.subject, None);
        assert_eq!(claims.user_id(), None);
    }

    #[tokio::test]
    async fn token_without_expiry_is_accepted() {
        let token = sign(
            &TestClaims {
                sub: Some("user-1"),
                exp: None,
            },
            SECRET,
        );

        let claims = verifier().verify(&token).await.unwrap();

        assert_eq!(claims.subject.as_deref(), Some("user-1"));
    }
}
