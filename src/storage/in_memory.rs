//! In-memory implementation of DataService for the dashboard

use crate::core::{Collection, DataService, Entity, query};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory data service
///
/// Holds one [`Collection`] behind a lock and swaps it on every write, so a
/// snapshot handed out earlier is never mutated. The lock is never held
/// across an await point.
#[derive(Clone)]
pub struct InMemoryDataService<T: Entity> {
    records: Arc<RwLock<Collection<T>>>,
}

impl<T: Entity> InMemoryDataService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a service preloaded with `records`
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(Collection::new(records))),
        }
    }

    /// The current collection
    pub fn snapshot(&self) -> Result<Collection<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.clone())
    }

    fn swap<R>(&self, write: impl FnOnce(&Collection<T>) -> (Collection<T>, R)) -> Result<R> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let (next, result) = write(&records);
        *records = next;

        Ok(result)
    }
}

impl<T: Entity> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.snapshot()?.to_vec())
    }

    async fn get(&self, id: u64) -> Result<Option<T>> {
        Ok(self.snapshot()?.get(id).cloned())
    }

    async fn create(&self, record: T) -> Result<T> {
        let created = self.swap(|records| match records.add(record) {
            Ok((next, created)) => (next, Ok(created)),
            Err(err) => (records.clone(), Err(err)),
        })??;

        let entity = T::resource_name_singular();
        tracing::debug!(entity, id = created.id(), "created");
        Ok(created)
    }

    async fn update(&self, id: u64, record: T) -> Result<Option<T>> {
        self.swap(|records| {
            if !records.contains(id) {
                return (records.clone(), None);
            }
            let next = records.replace(id, record);
            let updated = next.get(id).cloned();
            (next, updated)
        })
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        self.swap(|records| {
            let existed = records.contains(id);
            (records.remove(id), existed)
        })
    }

    async fn search(&self, query: &str, status: Option<T::Status>) -> Result<Vec<T>> {
        let records = self.snapshot()?;
        Ok(query::filter_by_status(records.as_slice(), query, status))
    }
}
