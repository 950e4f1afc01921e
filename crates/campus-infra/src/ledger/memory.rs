//! In-memory refresh token ledger.
//!
//! Backs the ledger port with a keyed map and conditional status
//! transitions. A database-backed ledger replaces the map with a row
//! per token id and the write lock with a conditional UPDATE.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use campus_core::domain::{RefreshRecord, RefreshStatus};
use campus_core::ports::{Clock, LedgerError, RefreshLedger};

/// In-memory ledger using a HashMap behind an async RwLock.
///
/// Records are never removed: a rotated or revoked record must stay
/// resolvable so replayed ids are recognized instead of reported
/// unknown.
pub struct InMemoryRefreshLedger {
    records: RwLock<HashMap<Uuid, RefreshRecord>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl InMemoryRefreshLedger {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    fn fresh_record(&self, subject: &str, now: DateTime<Utc>) -> RefreshRecord {
        RefreshRecord {
            token_id: Uuid::new_v4(),
            subject: subject.to_string(),
            issued_at: now,
            expires_at: now + self.ttl,
            status: RefreshStatus::Active,
        }
    }
}

#[async_trait]
impl RefreshLedger for InMemoryRefreshLedger {
    async fn issue(&self, subject: &str) -> Result<RefreshRecord, LedgerError> {
        let record = self.fresh_record(subject, self.clock.now());
        self.records
            .write()
            .await
            .insert(record.token_id, record.clone());
        Ok(record)
    }

    async fn redeem(&self, token_id: Uuid) -> Result<RefreshRecord, LedgerError> {
        let records = self.records.read().await;
        let record = records.get(&token_id).ok_or(LedgerError::Unknown)?;

        // Terminal status beats expiry: a rotated record keeps
        // reporting AlreadyRotated past its lifetime so replay
        // detection works for the whole retention window.
        match record.status {
            RefreshStatus::Rotated { .. } => Err(LedgerError::AlreadyRotated),
            RefreshStatus::Revoked => Err(LedgerError::Revoked),
            RefreshStatus::Active if record.is_expired_at(self.clock.now()) => {
                Err(LedgerError::Expired)
            }
            RefreshStatus::Active => Ok(record.clone()),
        }
    }

    async fn rotate(&self, old_id: Uuid, subject: &str) -> Result<RefreshRecord, LedgerError> {
        // The write lock spans the status check and both mutations, so
        // concurrent rotations of one id produce exactly one winner.
        let mut records = self.records.write().await;
        let successor = self.fresh_record(subject, self.clock.now());

        match records.get_mut(&old_id) {
            None => return Err(LedgerError::Unknown),
            Some(old) => match old.status {
                RefreshStatus::Rotated { .. } => return Err(LedgerError::AlreadyRotated),
                RefreshStatus::Revoked => return Err(LedgerError::Revoked),
                RefreshStatus::Active => {
                    old.status = RefreshStatus::Rotated {
                        successor: successor.token_id,
                    };
                }
            },
        }

        records.insert(successor.token_id, successor.clone());
        Ok(successor)
    }

    async fn revoke(&self, token_id: Uuid) -> Result<(), LedgerError> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&token_id).ok_or(LedgerError::Unknown)?;

        // Rotated and revoked records stay as they are; revoking them
        // again is a no-op success.
        if record.is_active() {
            record.status = RefreshStatus::Revoked;
        }
        Ok(())
    }

    async fn revoke_all(&self, subject: &str) -> Result<usize, LedgerError> {
        let mut records = self.records.write().await;
        let mut revoked = 0;

        for record in records.values_mut() {
            if record.subject == subject && record.is_active() {
                record.status = RefreshStatus::Revoked;
                revoked += 1;
            }
        }
        Ok(revoked)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting_now() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc::now())))
        }

        fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn ledger(clock: Arc<ManualClock>) -> InMemoryRefreshLedger {
        InMemoryRefreshLedger::new(Duration::days(7), clock)
    }

    #[tokio::test]
    async fn test_issue_then_redeem() {
        let ledger = ledger(ManualClock::starting_now());

        let issued = ledger.issue("1234567890123").await.unwrap();
        let redeemed = ledger.redeem(issued.token_id).await.unwrap();

        assert_eq!(redeemed.token_id, issued.token_id);
        assert_eq!(redeemed.subject, "1234567890123");
        assert!(redeemed.is_active());
    }

    #[tokio::test]
    async fn test_redeem_unknown_id() {
        let ledger = ledger(ManualClock::starting_now());

        assert_eq!(
            ledger.redeem(Uuid::new_v4()).await,
            Err(LedgerError::Unknown)
        );
    }

    #[tokio::test]
    async fn test_redeem_does_not_transition() {
        let ledger = ledger(ManualClock::starting_now());
        let issued = ledger.issue("1234567890123").await.unwrap();

        ledger.redeem(issued.token_id).await.unwrap();
        // Still redeemable until rotate is called.
        assert!(ledger.redeem(issued.token_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_rotate_marks_predecessor() {
        let ledger = ledger(ManualClock::starting_now());
        let issued = ledger.issue("1234567890123").await.unwrap();

        let successor = ledger.rotate(issued.token_id, "1234567890123").await.unwrap();

        assert_ne!(successor.token_id, issued.token_id);
        assert_eq!(
            ledger.redeem(issued.token_id).await,
            Err(LedgerError::AlreadyRotated)
        );
        assert!(ledger.redeem(successor.token_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_rotate_twice_fails() {
        let ledger = ledger(ManualClock::starting_now());
        let issued = ledger.issue("1234567890123").await.unwrap();

        ledger.rotate(issued.token_id, "1234567890123").await.unwrap();
        assert_eq!(
            ledger.rotate(issued.token_id, "1234567890123").await,
            Err(LedgerError::AlreadyRotated)
        );
    }

    #[tokio::test]
    async fn test_revoked_cannot_be_redeemed_or_rotated() {
        let ledger = ledger(ManualClock::starting_now());
        let issued = ledger.issue("1234567890123").await.unwrap();

        ledger.revoke(issued.token_id).await.unwrap();

        assert_eq!(
            ledger.redeem(issued.token_id).await,
            Err(LedgerError::Revoked)
        );
        assert_eq!(
            ledger.rotate(issued.token_id, "1234567890123").await,
            Err(LedgerError::Revoked)
        );
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let ledger = ledger(ManualClock::starting_now());
        let issued = ledger.issue("1234567890123").await.unwrap();

        ledger.revoke(issued.token_id).await.unwrap();
        ledger.revoke(issued.token_id).await.unwrap();

        let rotated = ledger.issue("1234567890123").await.unwrap();
        ledger.rotate(rotated.token_id, "1234567890123").await.unwrap();
        // Revoking a rotated record is a no-op success and must not
        // clobber its successor pointer.
        ledger.revoke(rotated.token_id).await.unwrap();
        assert_eq!(
            ledger.redeem(rotated.token_id).await,
            Err(LedgerError::AlreadyRotated)
        );
    }

    #[tokio::test]
    async fn test_expired_record() {
        let clock = ManualClock::starting_now();
        let ledger = ledger(clock.clone());
        let issued = ledger.issue("1234567890123").await.unwrap();

        clock.advance(Duration::days(8));
        assert_eq!(
            ledger.redeem(issued.token_id).await,
            Err(LedgerError::Expired)
        );
    }

    #[tokio::test]
    async fn test_revoke_all_spares_other_subjects() {
        let ledger = ledger(ManualClock::starting_now());
        let a1 = ledger.issue("1111111111111").await.unwrap();
        let a2 = ledger.issue("1111111111111").await.unwrap();
        let b = ledger.issue("2222222222222").await.unwrap();

        let revoked = ledger.revoke_all("1111111111111").await.unwrap();

        assert_eq!(revoked, 2);
        assert_eq!(ledger.redeem(a1.token_id).await, Err(LedgerError::Revoked));
        assert_eq!(ledger.redeem(a2.token_id).await, Err(LedgerError::Revoked));
        assert!(ledger.redeem(b.token_id).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_concurrent_rotation_single_winner() {
        let ledger = Arc::new(InMemoryRefreshLedger::new(
            Duration::days(7),
            ManualClock::starting_now(),
        ));
        let issued = ledger.issue("1234567890123").await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let ledger = ledger.clone();
            let old_id = issued.token_id;
            handles.push(tokio::spawn(async move {
                ledger.rotate(old_id, "1234567890123").await
            }));
        }

        let mut winners = 0;
        let mut losers = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => winners += 1,
                Err(LedgerError::AlreadyRotated) => losers += 1,
                Err(e) => panic!("unexpected ledger error: {e}"),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(losers, 15);
    }
}
