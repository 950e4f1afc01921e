//! Credential store port.

use async_trait::async_trait;

use crate::domain::Identity;
use crate::error::RepoError;

/// Lookup and lifecycle of identities.
///
/// `find_by_login` resolves a login identifier against username and
/// email internally; callers never learn which matched.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find an identity by login identifier (username or email).
    async fn find_by_login(&self, identifier: &str) -> Result<Option<Identity>, RepoError>;

    /// Find an identity by its RA.
    async fn find_by_ra(&self, ra: &str) -> Result<Option<Identity>, RepoError>;

    /// Persist a new identity, assigning its id. Fails with
    /// `RepoError::Constraint` when RA, email or username is taken.
    async fn save(&self, identity: Identity) -> Result<Identity, RepoError>;

    /// Replace the stored password hash. The only mutation an identity
    /// sees after registration.
    async fn update_password(&self, ra: &str, password_hash: &str) -> Result<(), RepoError>;

    /// Remove an identity. Tokens already issued for it die at the guard,
    /// which re-resolves the RA on every request.
    async fn delete(&self, ra: &str) -> Result<(), RepoError>;
}
