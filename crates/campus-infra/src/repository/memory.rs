//! In-memory repository for owner-scoped records.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use campus_core::domain::OwnedRecord;
use campus_core::error::RepoError;
use campus_core::ports::{BaseRepository, OwnedRepository};

/// One keyed store per record type; listing filters on the owner RA at
/// the store, never after materialization.
pub struct InMemoryOwnedRepository<T> {
    rows: RwLock<HashMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T> InMemoryOwnedRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<T> Default for InMemoryOwnedRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> BaseRepository<T> for InMemoryOwnedRepository<T>
where
    T: OwnedRecord + Clone + Send + Sync,
{
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, mut entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.write().await;
        if entity.id() == 0 {
            entity.set_id(self.next_id.fetch_add(1, Ordering::Relaxed));
        }
        rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl<T> OwnedRepository<T> for InMemoryOwnedRepository<T>
where
    T: OwnedRecord + Clone + Send + Sync,
{
    async fn list_by_owner(&self, ra: &str) -> Result<Vec<T>, RepoError> {
        let rows = self.rows.read().await;
        let mut owned: Vec<T> = rows
            .values()
            .filter(|row| row.owner_ra() == ra)
            .cloned()
            .collect();
        owned.sort_by_key(|row| row.id());
        Ok(owned)
    }
}
