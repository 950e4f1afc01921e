//! Per-request identity resolution and ownership checks.

use std::sync::Arc;

use crate::domain::Identity;
use crate::ports::{AuthError, CredentialStore, TokenCodec, TokenKind};

/// Resolves the caller's identity from an access token and answers
/// ownership queries for resource-bearing operations.
pub struct AuthorizationGuard {
    codec: Arc<dyn TokenCodec>,
    store: Arc<dyn CredentialStore>,
}

impl AuthorizationGuard {
    pub fn new(codec: Arc<dyn TokenCodec>, store: Arc<dyn CredentialStore>) -> Self {
        Self { codec, store }
    }

    /// Decode an access token and resolve its subject to a live
    /// identity.
    ///
    /// Any decode failure, and an identity deleted after issuance, fail
    /// with `Unauthenticated`.
    pub async fn authenticate(&self, access_token: &str) -> Result<Identity, AuthError> {
        let claims = self
            .codec
            .decode(access_token, TokenKind::Access)
            .map_err(|e| {
                tracing::debug!(error = %e, "access token rejected");
                AuthError::Unauthenticated
            })?;

        self.store
            .find_by_ra(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)
    }

    /// True iff the record owner is the authenticated identity. Handlers
    /// call this before every mutating or single-record read and answer
    /// 403 on false.
    pub fn check_ownership(&self, identity: &Identity, owner_ra: &str) -> bool {
        identity.ra == owner_ra
    }
}
