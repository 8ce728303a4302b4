//! Service trait for entity storage

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;

/// Service trait for managing one entity type
///
/// Implementations own a collection and replace it wholesale on every write.
/// The HTTP layer only talks to this trait, so the storage mechanism stays
/// swappable.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// All records in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Get a record by id
    async fn get(&self, id: u64) -> Result<Option<T>>;

    /// Store a new record; the id is assigned by the service
    async fn create(&self, record: T) -> Result<T>;

    /// Replace the record `id`, keeping its id. `None` when it does not exist.
    async fn update(&self, id: u64, record: T) -> Result<Option<T>>;

    /// Remove `id`. Returns whether a record was removed.
    async fn delete(&self, id: u64) -> Result<bool>;

    /// Records matching the free-text query and optional status
    async fn search(&self, query: &str, status: Option<T::Status>) -> Result<Vec<T>>;
}
