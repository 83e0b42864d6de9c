//! Credential fingerprint used as the rejection-cache key.

use std::fmt;

/// 32-bit rolling hash of a raw credential.
///
/// Not a security primitive. Two credentials colliding only means one of
/// them may be throttled a little longer than necessary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialFingerprint(i32);

impl CredentialFingerprint {
    /// Hashes the credential over its UTF-16 code units: `h = h * 31 + c`,
    /// wrapping at 32 bits.
    pub fn of(credential: &str) -> Self {
        let hash = credential
            .encode_utf16()
            .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(i32::from(c)));
        Self(hash)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for CredentialFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
