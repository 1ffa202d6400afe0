//! Object Store Module
//!
//! Minimal key/blob capability the pause event store is written against.
//! Backends:
//! - `OperatorObjectStore`: OpenDAL operator (S3 bucket or local filesystem)
//! - `MemoryObjectStore`: process-local map, for tests and throwaway runs

mod memory;
mod operator;

pub use memory::MemoryObjectStore;
pub use operator::OperatorObjectStore;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StoreBackend;

/// Errors raised by object store backends
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Object store operation on '{key}' failed: {message}")]
    Backend { key: String, message: String },

    #[error("Failed to configure object store: {0}")]
    Config(String),
}

impl ObjectStoreError {
    pub fn backend(key: impl Into<String>, message: impl ToString) -> Self {
        Self::Backend {
            key: key.into(),
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, ObjectStoreError>;

/// Key/blob storage primitives.
///
/// No cross-key atomicity is offered. Implementations must give
/// read-after-write consistency for a single key.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Creates or overwrites `key`
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()>;

    /// Reads `key`, failing with `NotFound` if absent
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    async fn exists(&self, key: &str) -> Result<bool>;

    /// Lists every object key under `prefix`, recursively
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Opens the configured backend
pub fn open(backend: &StoreBackend) -> Result<Arc<dyn ObjectStore>> {
    let store: Arc<dyn ObjectStore> = match backend {
        StoreBackend::S3 {
            bucket,
            region,
            endpoint,
        } => {
            tracing::info!("Using S3 bucket '{}' in {}", bucket, region);
            Arc::new(OperatorObjectStore::s3(bucket, region, endpoint.as_deref())?)
        }
        StoreBackend::Fs { root } => {
            tracing::info!("Using filesystem store at {}", root.display());
            Arc::new(OperatorObjectStore::fs(root)?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store - pause events will not survive a restart");
            Arc::new(MemoryObjectStore::new())
        }
    };

    Ok(store)
}
