//! In-memory object store

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{ObjectStore, ObjectStoreError, Result};

/// Object store backed by a shared ordered map
#[derive(Clone, Default)]
pub struct MemoryObjectStore {
    objects: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(key: &str) -> ObjectStoreError {
        ObjectStoreError::backend(key, "memory store lock poisoned")
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        let mut objects = self.objects.write().map_err(|_| Self::poisoned(key))?;
        objects.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let objects = self.objects.read().map_err(|_| Self::poisoned(key))?;
        objects
            .get(key)
            .cloned()
            .ok_or_else(|| ObjectStoreError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut objects = self.objects.write().map_err(|_| Self::poisoned(key))?;
        objects.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let objects = self.objects.read().map_err(|_| Self::poisoned(key))?;
        Ok(objects.contains_key(key))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let objects = self.objects.read().map_err(|_| Self::poisoned(prefix))?;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}
