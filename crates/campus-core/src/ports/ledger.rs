//! Refresh token ledger port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::RefreshRecord;

/// Redemption/rotation failures.
///
/// Only `Storage` is an operational fault; the rest classify why a
/// presented token id is not redeemable. Callers collapse them before
/// anything reaches a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Unknown token id")]
    Unknown,

    #[error("Token was already rotated")]
    AlreadyRotated,

    #[error("Token was revoked")]
    Revoked,

    #[error("Token has expired")]
    Expired,

    #[error("Ledger storage error: {0}")]
    Storage(String),
}

/// Persisted record of issued refresh tokens, enforcing single-use
/// rotation.
///
/// State machine per record: `Active --rotate--> Rotated{successor}`,
/// `Active --revoke--> Revoked`. Rotated and revoked are terminal;
/// redeeming either is an error with no transition. Expiry is derived
/// from the record's timestamp at redemption time, not stored.
#[async_trait]
pub trait RefreshLedger: Send + Sync {
    /// Create a fresh active record with a new unique token id and a
    /// days-scale lifetime.
    async fn issue(&self, subject: &str) -> Result<RefreshRecord, LedgerError>;

    /// Look up a token id and classify it. Applies no state transition;
    /// a successful redemption must be followed by `rotate`.
    async fn redeem(&self, token_id: Uuid) -> Result<RefreshRecord, LedgerError>;

    /// Atomically mark `old_id` rotated (successor set to the new
    /// record's id) and create the new active record. Only an `Active`
    /// record rotates; under concurrent rotation of the same id exactly
    /// one caller wins and the rest get `AlreadyRotated`.
    async fn rotate(&self, old_id: Uuid, subject: &str) -> Result<RefreshRecord, LedgerError>;

    /// Mark a record revoked. No-op success when the record is already
    /// rotated or revoked.
    async fn revoke(&self, token_id: Uuid) -> Result<(), LedgerError>;

    /// Revoke every non-terminal record of a subject. Returns how many
    /// records transitioned.
    async fn revoke_all(&self, subject: &str) -> Result<usize, LedgerError>;
}
