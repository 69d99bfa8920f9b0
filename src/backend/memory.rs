//! In-memory backend
//!
//! Reference `StorageBackend` over a `BTreeMap`, used by the test suite and
//! embeddable by consumers that want an offline store. Listing order is key
//! order, matching the lexicographic listing of real object stores.

use super::{ObjectHandle, StorageBackend};
use crate::error::BackendError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Key → object size. Content is irrelevant to reconciliation, so only
/// sizes are retained.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    objects: RwLock<BTreeMap<String, u64>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object directly, bypassing the trait. Keys ending in `/` act
    /// as directory markers.
    pub fn insert(&self, key: &str, size: u64) {
        self.objects.write().insert(key.to_string(), size);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<ObjectHandle>, BackendError> {
        let objects = self.objects.read();
        Ok(objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, size)| ObjectHandle {
                key: key.clone(),
                size: *size,
            })
            .collect())
    }

    async fn file_exists(&self, key: &str) -> Result<bool, BackendError> {
        Ok(self.objects.read().contains_key(key))
    }

    async fn delete_file(&self, key: &str) -> Result<(), BackendError> {
        match self.objects.write().remove(key) {
            Some(_) => Ok(()),
            None => Err(BackendError::NotFound(key.to_string())),
        }
    }

    async fn create_empty_marker(&self, key: &str) -> Result<(), BackendError> {
        self.objects.write().insert(key.to_string(), 0);
        Ok(())
    }
}
