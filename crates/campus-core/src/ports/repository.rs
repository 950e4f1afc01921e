use async_trait::async_trait;

use crate::domain::OwnedRecord;
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}

/// Repository for records owned by a single identity.
#[async_trait]
pub trait OwnedRepository<T: OwnedRecord>: BaseRepository<T> {
    /// List every record owned by `ra`.
    ///
    /// Filtering happens at the query, not after materialization, so no
    /// record belonging to another identity is ever constructed.
    async fn list_by_owner(&self, ra: &str) -> Result<Vec<T>, RepoError>;
}
