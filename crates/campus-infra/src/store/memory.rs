//! In-memory credential store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::domain::Identity;
use campus_core::error::RepoError;
use campus_core::ports::CredentialStore;

/// Identities keyed by RA, with the same uniqueness constraints a
/// relational table would enforce on RA, email and username.
pub struct InMemoryCredentialStore {
    identities: RwLock<HashMap<String, Identity>>,
    next_id: AtomicI64,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_login(&self, identifier: &str) -> Result<Option<Identity>, RepoError> {
        let identities = self.identities.read().await;

        // Username first, email second; the first match wins.
        let found = identities
            .values()
            .find(|identity| identity.username == identifier)
            .or_else(|| {
                identities
                    .values()
                    .find(|identity| identity.email == identifier)
            });
        Ok(found.cloned())
    }

    async fn find_by_ra(&self, ra: &str) -> Result<Option<Identity>, RepoError> {
        Ok(self.identities.read().await.get(ra).cloned())
    }

    async fn save(&self, mut identity: Identity) -> Result<Identity, RepoError> {
        let mut identities = self.identities.write().await;

        if identities.contains_key(&identity.ra) {
            return Err(RepoError::Constraint("RA already registered".to_string()));
        }
        if identities.values().any(|i| i.email == identity.email) {
            return Err(RepoError::Constraint("email already registered".to_string()));
        }
        if identities.values().any(|i| i.username == identity.username) {
            return Err(RepoError::Constraint("username already taken".to_string()));
        }

        identity.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        identities.insert(identity.ra.clone(), identity.clone());
        Ok(identity)
    }

    async fn update_password(&self, ra: &str, password_hash: &str) -> Result<(), RepoError> {
        let mut identities = self.identities.write().await;
        let identity = identities.get_mut(ra).ok_or(RepoError::NotFound)?;
        identity.password_hash = password_hash.to_string();
        Ok(())
    }

    async fn delete(&self, ra: &str) -> Result<(), RepoError> {
        self.identities
            .write()
            .await
            .remove(ra)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}
