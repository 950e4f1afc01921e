//! Login, refresh and logout orchestration.

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::domain::RefreshRecord;
use crate::ports::{
    AuthError, Claims, Clock, CredentialStore, LedgerError, PasswordHasher, RefreshLedger,
    TokenCodec, TokenError, TokenKind,
};

/// Well-formed digest verified against when the login identifier is
/// unknown, so a missing account costs the same as a wrong password.
const FALLBACK_DIGEST: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$gZiV/M1gPc22ElAH/Jh1Hw$CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno";

/// Tunables supplied at process start.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    /// Access token lifetime, minutes-scale.
    pub access_ttl: Duration,
    /// Revoke a subject's whole refresh chain when a rotated token id is
    /// presented again.
    pub revoke_chain_on_replay: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            access_ttl: Duration::minutes(30),
            revoke_chain_on_replay: false,
        }
    }
}

/// The access/refresh pair handed back on login and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Orchestrates credential verification and token issuance over the
/// credential store, hasher, codec and ledger ports.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
    ledger: Arc<dyn RefreshLedger>,
    clock: Arc<dyn Clock>,
    policy: AuthPolicy,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
        ledger: Arc<dyn RefreshLedger>,
        clock: Arc<dyn Clock>,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            store,
            hasher,
            codec,
            ledger,
            clock,
            policy,
        }
    }

    /// Verify credentials and issue a fresh token pair.
    ///
    /// Unknown identifier and wrong password return the identical error.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<TokenPair, AuthError> {
        let Some(identity) = self.store.find_by_login(identifier).await? else {
            self.hasher.verify(password, FALLBACK_DIGEST);
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &identity.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let record = self
            .ledger
            .issue(&identity.ra)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.encode_pair(&record)
    }

    /// Exchange a refresh token for a new pair, rotating it in the
    /// ledger.
    ///
    /// Every codec or ledger rejection collapses to `InvalidRefresh`;
    /// the distinction is kept in the logs for anomaly detection only.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let claims = self.decode_refresh(refresh_token)?;

        let record = match self.ledger.redeem(claims.jti).await {
            Ok(record) => record,
            Err(LedgerError::AlreadyRotated) => {
                tracing::warn!(
                    subject = %claims.sub,
                    token_id = %claims.jti,
                    "rotated refresh token presented again"
                );
                if self.policy.revoke_chain_on_replay {
                    self.revoke_chain(&claims.sub).await;
                }
                return Err(AuthError::InvalidRefresh);
            }
            Err(LedgerError::Storage(msg)) => return Err(AuthError::Internal(msg)),
            Err(e) => {
                tracing::debug!(
                    error = %e,
                    token_id = %claims.jti,
                    "refresh token rejected by ledger"
                );
                return Err(AuthError::InvalidRefresh);
            }
        };

        let rotated = match self.ledger.rotate(record.token_id, &record.subject).await {
            Ok(rotated) => rotated,
            Err(LedgerError::Storage(msg)) => return Err(AuthError::Internal(msg)),
            Err(e) => {
                // Lost the rotation race to a concurrent redemption.
                tracing::debug!(error = %e, token_id = %record.token_id, "rotation lost");
                return Err(AuthError::InvalidRefresh);
            }
        };

        self.encode_pair(&rotated)
    }

    /// Revoke the ledger record behind a refresh token.
    ///
    /// Idempotent: a token already rotated, revoked or unknown to the
    /// ledger logs out successfully.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let claims = self.decode_refresh(refresh_token)?;

        match self.ledger.revoke(claims.jti).await {
            Ok(()) | Err(LedgerError::Unknown) => Ok(()),
            Err(LedgerError::Storage(msg)) => Err(AuthError::Internal(msg)),
            Err(_) => Ok(()),
        }
    }

    fn decode_refresh(&self, token: &str) -> Result<Claims, AuthError> {
        self.codec
            .decode(token, TokenKind::Refresh)
            .map_err(|e: TokenError| {
                tracing::debug!(error = %e, "refresh token rejected at decode");
                AuthError::InvalidRefresh
            })
    }

    /// Encode the pair bound to a ledger record: the refresh token
    /// carries the record's id and expiry, the access token a throwaway
    /// id and the short TTL.
    fn encode_pair(&self, record: &RefreshRecord) -> Result<TokenPair, AuthError> {
        let now = self.clock.now();

        let refresh_token = self
            .codec
            .encode(&Claims {
                sub: record.subject.clone(),
                kind: TokenKind::Refresh,
                issued_at: now,
                expires_at: record.expires_at,
                jti: record.token_id,
            })
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let access_token = self
            .codec
            .encode(&Claims {
                sub: record.subject.clone(),
                kind: TokenKind::Access,
                issued_at: now,
                expires_at: now + self.policy.access_ttl,
                jti: Uuid::new_v4(),
            })
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn revoke_chain(&self, subject: &str) {
        match self.ledger.revoke_all(subject).await {
            Ok(revoked) => {
                tracing::warn!(subject = %subject, revoked, "refresh chain revoked after replay");
            }
            Err(e) => {
                tracing::error!(subject = %subject, error = %e, "failed to revoke refresh chain");
            }
        }
    }
}
