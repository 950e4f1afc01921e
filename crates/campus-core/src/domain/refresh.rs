use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a refresh token in the ledger.
///
/// `Rotated` and `Revoked` are terminal. Expiry is not a stored state; it
/// is derived from `expires_at` at redemption time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshStatus {
    Active,
    Rotated { successor: Uuid },
    Revoked,
}

/// Ledger entry for one issued refresh token.
///
/// Records are never physically deleted: a rotated record must stay
/// resolvable so a replayed token id can be recognized as such.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRecord {
    pub token_id: Uuid,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: RefreshStatus,
}

impl RefreshRecord {
    pub fn is_active(&self) -> bool {
        self.status == RefreshStatus::Active
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
