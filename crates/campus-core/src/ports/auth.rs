//! Authentication errors and the password hashing port.

use crate::error::RepoError;

/// Errors surfaced by the authentication and authorization services.
///
/// Client-facing variants deliberately carry no detail: which check
/// failed on login, or why a refresh token was rejected, is logged
/// internally and never exposed.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid refresh token")]
    InvalidRefresh,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Hashing error: {0}")]
    Hashing(String),

    #[error("Store error: {0}")]
    Store(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Password hashing service.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password into a self-describing salted digest.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored digest.
    ///
    /// Fails closed: a malformed digest or an internal error verifies as
    /// `false`, indistinguishable from a wrong password.
    fn verify(&self, password: &str, digest: &str) -> bool;
}
