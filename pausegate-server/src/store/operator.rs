//! OpenDAL-backed object store

use std::path::Path;

use async_trait::async_trait;
use opendal::{ErrorKind, Operator, services};

use super::{ObjectStore, ObjectStoreError, Result};

/// Object store over an OpenDAL operator
#[derive(Clone)]
pub struct OperatorObjectStore {
    op: Operator,
}

impl OperatorObjectStore {
    pub fn new(op: Operator) -> Self {
        Self { op }
    }

    /// Store backed by an S3 bucket
    pub fn s3(bucket: &str, region: &str, endpoint: Option<&str>) -> Result<Self> {
        let mut builder = services::S3::default().bucket(bucket).region(region);
        if let Some(endpoint) = endpoint {
            builder = builder.endpoint(endpoint);
        }

        let op = Operator::new(builder)
            .map_err(|e| ObjectStoreError::Config(e.to_string()))?
            .finish();
        Ok(Self::new(op))
    }

    /// Store rooted at a local directory
    pub fn fs(root: &Path) -> Result<Self> {
        let builder = services::Fs::default().root(&root.to_string_lossy());
        let op = Operator::new(builder)
            .map_err(|e| ObjectStoreError::Config(e.to_string()))?
            .finish();
        Ok(Self::new(op))
    }
}

fn map_err(key: &str, err: opendal::Error) -> ObjectStoreError {
    if err.kind() == ErrorKind::NotFound {
        ObjectStoreError::NotFound(key.to_string())
    } else {
        ObjectStoreError::backend(key, err)
    }
}

#[async_trait]
impl ObjectStore for OperatorObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.op
            .write(key, bytes)
            .await
            .map(|_| ())
            .map_err(|e| map_err(key, e))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let buffer = self.op.read(key).await.map_err(|e| map_err(key, e))?;
        Ok(buffer.to_vec())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.op.delete(key).await.map_err(|e| map_err(key, e))
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.op.exists(key).await.map_err(|e| map_err(key, e))
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let entries = match self.op.list_with(prefix).recursive(true).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_err(prefix, e)),
        };

        Ok(entries
            .into_iter()
            .filter(|entry| entry.metadata().is_file())
            .map(|entry| entry.path().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = OperatorObjectStore::fs(dir.path()).unwrap();

        store
            .put("paused/current/edxapp_x.yml", b"event_id: x".to_vec())
            .await
            .unwrap();
        store
            .put("paused/history/2017/04/edxapp_x.yml", b"event_id: x".to_vec())
            .await
            .unwrap();

        assert!(store.exists("paused/current/edxapp_x.yml").await.unwrap());
        assert_eq!(
            store.get("paused/current/edxapp_x.yml").await.unwrap(),
            b"event_id: x"
        );

        let keys = store.list_keys("paused/current/").await.unwrap();
        assert_eq!(keys, vec!["paused/current/edxapp_x.yml"]);

        store.delete("paused/current/edxapp_x.yml").await.unwrap();
        assert!(!store.exists("paused/current/edxapp_x.yml").await.unwrap());
        assert!(store.exists("paused/history/2017/04/edxapp_x.yml").await.unwrap());
    }

    #[tokio::test]
    async fn test_fs_store_missing_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = OperatorObjectStore::fs(dir.path()).unwrap();

        let err = store.get("paused/current/nope.yml").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(store.list_keys("paused/current/").await.unwrap().is_empty());
    }
}
