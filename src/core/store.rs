//! Copy-on-write record collection
//!
//! A [`Collection`] is an immutable ordered sequence of records. Every
//! mutation returns a new collection and leaves the receiver untouched, so a
//! caller can keep a previous snapshot around (or swap the new one into
//! shared state) without any further coordination.

use crate::core::entity::Entity;
use crate::core::error::EntityError;
use std::sync::Arc;

/// Ordered sequence of records with ids unique within the collection
#[derive(Debug)]
pub struct Collection<T> {
    records: Arc<Vec<T>>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Arc::new(Vec::new()),
        }
    }
}

impl<T: Entity> Collection<T> {
    /// Wrap an initial record set (usually seed data)
    pub fn new(records: Vec<T>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<u64> = records.iter().map(T::id).collect();
                ids.sort_unstable();
                ids.windows(2).all(|pair| pair[0] != pair[1])
            },
            "duplicate ids in {} seed",
            T::resource_name()
        );

        Self {
            records: Arc::new(records),
        }
    }

    /// Records in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by id
    pub fn get(&self, id: u64) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    /// Id the next added record receives: max existing id + 1, or 1 when empty.
    ///
    /// `None` once a record holds `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.records.iter().map(T::id).max().unwrap_or(0).checked_add(1)
    }

    /// Append a record under a fresh id.
    ///
    /// Whatever id `record` carries is replaced. Returns the new collection
    /// and the stored record, or [`EntityError::IdsExhausted`] with the
    /// collection left as it was.
    pub fn add(&self, mut record: T) -> Result<(Self, T), EntityError> {
        let id = self.next_id().ok_or_else(EntityError::ids_exhausted::<T>)?;
        record.set_id(id);

        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.extend(self.records.iter().cloned());
        records.push(record.clone());

        tracing::debug!(
            entity = T::resource_name_singular(),
            id = record.id(),
            "record added"
        );

        Ok((
            Self {
                records: Arc::new(records),
            },
            record,
        ))
    }

    /// Replace the record with `id` by `patch(old)`, keeping its position.
    ///
    /// The patched record keeps `id` even if `patch` changed it. A missing
    /// id is a no-op and returns an equal collection.
    pub fn update(&self, id: u64, patch: impl FnOnce(&T) -> T) -> Self {
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            tracing::debug!(entity = T::resource_name_singular(), id, "update skipped, no such id");
            return self.clone();
        };

        let mut patched = patch(&self.records[index]);
        patched.set_id(id);

        let mut records = self.records.as_ref().clone();
        records[index] = patched;

        tracing::debug!(entity = T::resource_name_singular(), id, "record updated");

        Self {
            records: Arc::new(records),
        }
    }

    /// Replace the record with `id` wholesale; see [`update`](Self::update)
    pub fn replace(&self, id: u64, record: T) -> Self {
        self.update(id, move |_| record)
    }

    /// Drop the record with `id`, preserving the order of the others.
    ///
    /// A missing id is a no-op.
    pub fn remove(&self, id: u64) -> Self {
        if !self.contains(id) {
            return self.clone();
        }

        let records: Vec<T> = self
            .records
            .iter()
            .filter(|record| record.id() != id)
            .cloned()
            .collect();

        tracing::debug!(entity = T::resource_name_singular(), id, "record removed");

        Self {
            records: Arc::new(records),
        }
    }

    /// Copy the records out
    pub fn to_vec(&self) -> Vec<T> {
        self.records.as_ref().clone()
    }
}

impl<T: Entity> From<Vec<T>> for Collection<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
