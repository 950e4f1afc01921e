//! Signed-token codec port.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which of the two token families a claims set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by a signed token.
///
/// `sub` is the subject's RA. For refresh tokens `jti` is the ledger
/// record's token id; for access tokens it is a throwaway unique id.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub kind: TokenKind,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub jti: Uuid,
}

/// Token decode failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token cannot be parsed")]
    Malformed,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Wrong token type")]
    WrongType,

    #[error("Token could not be signed: {0}")]
    Signing(String),
}

/// Codec for signed, expiring claims sets.
///
/// Implementations must verify the signature before trusting any claim,
/// including expiry, so a forged expiry cannot bypass the check.
pub trait TokenCodec: Send + Sync {
    /// Serialize and sign a claims set into a compact token string.
    fn encode(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Verify signature, expiry and token type, in that order.
    fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError>;
}
