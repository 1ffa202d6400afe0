//! Pause Event Repository
//!
//! Persists pause event records in the object store. Two namespaces:
//! - `paused/current/`: one record per active event; its presence pauses the system
//! - `paused/history/{yyyy}/{mm}/`: permanent audit copy of every event
//!
//! Both copies share the base file name `{pipeline_system}_{time_paused}_{event_id}.yml`.
//! This layer knows the layout and the YAML encoding, nothing about pause semantics.

use std::sync::Arc;

use pausegate_core::domain::PauseEvent;
use thiserror::Error;

use crate::store::{ObjectStore, ObjectStoreError};

pub const CURRENT_PREFIX: &str = "paused/current/";
pub const HISTORY_PREFIX: &str = "paused/history/";
pub const RECORD_EXTENSION: &str = ".yml";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    #[error("Failed to encode pause event: {0}")]
    Encode(#[from] serde_yaml::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectStore(err) if err.is_not_found())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Base file name shared by the current and historical copies
pub fn record_file_name(event: &PauseEvent) -> String {
    format!(
        "{}_{}_{}{}",
        event.pipeline_system, event.time_paused, event.event_id, RECORD_EXTENSION
    )
}

pub fn current_key(event: &PauseEvent) -> String {
    format!("{}{}", CURRENT_PREFIX, record_file_name(event))
}

pub fn historical_key(event: &PauseEvent) -> String {
    format!(
        "{}{}/{:02}/{}",
        HISTORY_PREFIX,
        event.time_paused.year(),
        event.time_paused.month(),
        record_file_name(event)
    )
}

/// Pause event persistence over an object store
#[derive(Clone)]
pub struct PauseEventStore {
    objects: Arc<dyn ObjectStore>,
}

impl PauseEventStore {
    pub fn new(objects: Arc<dyn ObjectStore>) -> Self {
        Self { objects }
    }

    /// Lists current pause events, optionally filtered by system and event ID.
    ///
    /// Records that cannot be read as a pause event are logged and skipped.
    pub async fn list_current(
        &self,
        pipeline_system: Option<&str>,
        event_id: Option<&str>,
    ) -> Result<Vec<PauseEvent>> {
        let keys = self.objects.list_keys(CURRENT_PREFIX).await?;
        let mut events = Vec::new();

        for key in keys {
            if !key.ends_with(RECORD_EXTENSION) {
                continue;
            }

            let bytes = match self.objects.get(&key).await {
                Ok(bytes) => bytes,
                // Resolved between the listing and the read.
                Err(ObjectStoreError::NotFound(_)) => {
                    tracing::debug!("Pause record {} vanished during scan", key);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let event: PauseEvent = match serde_yaml::from_slice(&bytes) {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!("Unable to load pause record {} - skipping: {}", key, err);
                    continue;
                }
            };

            if pipeline_system.is_some_and(|system| system != event.pipeline_system) {
                continue;
            }
            if event_id.is_some_and(|id| id != event.event_id) {
                continue;
            }

            events.push(event);
        }

        Ok(events)
    }

    pub async fn put_current(&self, event: &PauseEvent) -> Result<()> {
        self.put(&current_key(event), event).await
    }

    /// Deletes the current copy. Deleting an absent record is not an error at
    /// this layer; callers decide how to treat other failures.
    pub async fn delete_current(&self, event: &PauseEvent) -> Result<()> {
        self.objects.delete(&current_key(event)).await?;
        Ok(())
    }

    pub async fn current_exists(&self, event: &PauseEvent) -> Result<bool> {
        Ok(self.objects.exists(&current_key(event)).await?)
    }

    /// Creates or overwrites the historical copy
    pub async fn put_historical(&self, event: &PauseEvent) -> Result<()> {
        self.put(&historical_key(event), event).await
    }

    pub async fn historical_exists(&self, event: &PauseEvent) -> Result<bool> {
        Ok(self.objects.exists(&historical_key(event)).await?)
    }

    pub async fn get_historical(&self, event: &PauseEvent) -> Result<Option<PauseEvent>> {
        match self.objects.get(&historical_key(event)).await {
            Ok(bytes) => Ok(Some(serde_yaml::from_slice(&bytes)?)),
            Err(ObjectStoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn put(&self, key: &str, event: &PauseEvent) -> Result<()> {
        let body = serde_yaml::to_string(event)?;
        self.objects.put(key, body.into_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryObjectStore;
    use pausegate_core::domain::PauseTimestamp;

    fn event(id: &str, system: &str, time: &str) -> PauseEvent {
        PauseEvent::new(id, system, "TestUser", time.parse().unwrap(), "Paused for a test reason.")
    }

    fn store() -> (PauseEventStore, MemoryObjectStore) {
        let objects = MemoryObjectStore::new();
        (PauseEventStore::new(Arc::new(objects.clone())), objects)
    }

    #[test]
    fn test_key_layout() {
        let e = event("1a2b3c4d", "edxapp", "2017-04-07_01:00:00");
        assert_eq!(
            record_file_name(&e),
            "edxapp_2017-04-07_01:00:00_1a2b3c4d.yml"
        );
        assert_eq!(
            current_key(&e),
            "paused/current/edxapp_2017-04-07_01:00:00_1a2b3c4d.yml"
        );
        assert_eq!(
            historical_key(&e),
            "paused/history/2017/04/edxapp_2017-04-07_01:00:00_1a2b3c4d.yml"
        );
    }

    #[test]
    fn test_historical_key_month_padding() {
        let e = event("ffff0000", "ecommerce", "2016-11-30_23:59:59");
        assert!(historical_key(&e).starts_with("paused/history/2016/11/"));
    }

    #[tokio::test]
    async fn test_put_and_list_current() {
        let (store, _) = store();
        let e = event("1a2b3c4d", "edxapp", "2017-04-07_01:00:00");
        store.put_current(&e).await.unwrap();

        let events = store.list_current(None, None).await.unwrap();
        assert_eq!(events, vec![e]);
    }

    #[tokio::test]
    async fn test_list_current_filters() {
        let (store, _) = store();
        let a = event("aaaa0001", "edxapp", "2017-04-07_01:00:00");
        let b = event("bbbb0002", "edxapp", "2017-04-07_01:00:01");
        let c = event("cccc0003", "ecommerce", "2017-04-07_01:00:02");
        for e in [&a, &b, &c] {
            store.put_current(e).await.unwrap();
        }

        assert_eq!(store.list_current(Some("edxapp"), None).await.unwrap().len(), 2);
        assert_eq!(
            store.list_current(None, Some("cccc0003")).await.unwrap(),
            vec![c.clone()]
        );
        assert!(
            store
                .list_current(Some("edxapp"), Some("cccc0003"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_current_skips_malformed_records() {
        let (store, objects) = store();
        let good = event("1a2b3c4d", "edxapp", "2017-04-07_01:00:00");
        store.put_current(&good).await.unwrap();

        objects
            .put("paused/current/garbage.yml", b"{{ not: yaml".to_vec())
            .await
            .unwrap();
        objects
            .put("paused/current/empty.yml", Vec::new())
            .await
            .unwrap();
        objects
            .put("paused/current/notes.txt", b"ignored".to_vec())
            .await
            .unwrap();

        let events = store.list_current(None, None).await.unwrap();
        assert_eq!(events, vec![good]);
    }

    #[tokio::test]
    async fn test_historical_copy() {
        let (store, _) = store();
        let mut e = event("1a2b3c4d", "edxapp", "2017-04-07_01:00:00");
        assert!(!store.historical_exists(&e).await.unwrap());
        assert!(store.get_historical(&e).await.unwrap().is_none());

        store.put_historical(&e).await.unwrap();
        assert!(store.historical_exists(&e).await.unwrap());

        let cleared: PauseTimestamp = "2017-04-08_11:42:00".parse().unwrap();
        e.resolve("TestUser", cleared);
        store.put_historical(&e).await.unwrap();

        let stored = store.get_historical(&e).await.unwrap().unwrap();
        assert_eq!(stored.time_cleared, Some(cleared));
        assert!(store.list_current(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_current() {
        let (store, _) = store();
        let e = event("1a2b3c4d", "edxapp", "2017-04-07_01:00:00");
        store.put_current(&e).await.unwrap();
        assert!(store.current_exists(&e).await.unwrap());

        store.delete_current(&e).await.unwrap();
        assert!(!store.current_exists(&e).await.unwrap());

        // Already gone
        store.delete_current(&e).await.unwrap();
    }
}
