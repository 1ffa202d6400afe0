//! Pause Coordinator
//!
//! Pauses and resumes pipeline systems on behalf of operators.
//!
//! A system is paused while at least one current pause event references it.
//! Adding an event always (re)pauses every pipeline of the system. Removing an
//! event runs in two phases:
//! 1. `resolve_event`: move the event to its resolved state in storage
//! 2. `release_pipelines`: re-read the remaining events and unpause only if none are left
//!
//! Phase 2 must re-query storage. An add that lands between the phases has to
//! keep the system paused, and only a fresh read can see it.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use pausegate_core::domain::{PauseEvent, PauseTimestamp, PipelineSystemRegistry};
use pausegate_core::dto::pause::{PauseEventAdded, ReconcileReport, RemoveStatus, SystemStatus};
use sha1::{Digest, Sha1};
use thiserror::Error;
use uuid::Uuid;

use crate::control::{ControlError, PipelineControl};
use crate::repository::pause_event::{PauseEventStore, StoreError, historical_key};
use crate::service::clock::{Clock, SystemClock};

/// Errors returned by coordinator operations
#[derive(Debug, Error)]
pub enum PauseError {
    #[error("Pipeline system '{0}' is unknown")]
    UnknownPipelineSystem(String),

    #[error("Pause event '{0}' was not found")]
    EventNotFound(String),

    #[error("Multiple pause events found with ID '{0}'")]
    MultiplePauseEventsFound(String),

    #[error("Historical record '{key}' for pause event '{event_id}' does not exist")]
    HistoricalEventNotFound { event_id: String, key: String },

    #[error("Pause event storage failed: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Control(#[from] ControlError),
}

pub type Result<T> = std::result::Result<T, PauseError>;

/// Coordinates pause state in storage with the control plane.
///
/// Holds no mutable state; concurrent calls share it behind an `Arc`.
pub struct PauseCoordinator {
    store: PauseEventStore,
    control: Arc<dyn PipelineControl>,
    registry: PipelineSystemRegistry,
    clock: Arc<dyn Clock>,
}

impl PauseCoordinator {
    pub fn new(
        store: PauseEventStore,
        control: Arc<dyn PipelineControl>,
        registry: PipelineSystemRegistry,
    ) -> Self {
        Self {
            store,
            control,
            registry,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &PipelineSystemRegistry {
        &self.registry
    }

    /// Adds a pause event and pauses every pipeline of the system
    pub async fn add(
        &self,
        who_paused: &str,
        pipeline_system: &str,
        pause_reason: &str,
    ) -> Result<PauseEventAdded> {
        let pipelines = self
            .registry
            .pipelines_for(pipeline_system)
            .ok_or_else(|| PauseError::UnknownPipelineSystem(pipeline_system.to_string()))?;

        let now = self.clock.now();
        let event = PauseEvent::new(
            generate_event_id(now),
            pipeline_system,
            who_paused,
            PauseTimestamp::from_utc(now),
            pause_reason,
        );

        // Not atomic: a failure between the two writes is repaired by `reconcile`.
        self.store.put_current(&event).await?;
        self.store.put_historical(&event).await?;

        // Pause even if the system is already paused.
        for pipeline in pipelines {
            tracing::info!(
                "Pause event '{}' for pipeline system '{}' - pausing pipeline '{}'",
                event.event_id,
                pipeline_system,
                pipeline
            );
            self.control.pause(pipeline, pause_reason).await?;
        }

        tracing::info!(
            "Added pause event '{}': system '{}' paused by '{}' because '{}'",
            event.event_id,
            pipeline_system,
            who_paused,
            pause_reason
        );

        Ok(PauseEventAdded {
            event_id: event.event_id,
        })
    }

    /// Removes a pause event, unpausing the system if no other events remain
    pub async fn remove(&self, who_cleared: &str, event_id: &str) -> Result<RemoveStatus> {
        let pipeline_system = self.resolve_event(who_cleared, event_id).await?;
        let num_remaining_events = self.release_pipelines(event_id, &pipeline_system).await?;

        let status = RemoveStatus {
            pipeline_system,
            unpaused: num_remaining_events == 0,
            num_remaining_events,
        };

        tracing::info!(
            "Removed pause event '{}' by '{}': system '{}', unpaused={}, remaining={}",
            event_id,
            who_cleared,
            status.pipeline_system,
            status.unpaused,
            status.num_remaining_events
        );

        Ok(status)
    }

    /// Phase 1 of `remove`: resolves the event in storage.
    ///
    /// Returns the pipeline system the event belonged to.
    pub async fn resolve_event(&self, who_cleared: &str, event_id: &str) -> Result<String> {
        let mut matches = self.store.list_current(None, Some(event_id)).await?;

        let mut event = match matches.len() {
            0 => return Err(PauseError::EventNotFound(event_id.to_string())),
            1 => matches.remove(0),
            _ => return Err(PauseError::MultiplePauseEventsFound(event_id.to_string())),
        };

        if !self.store.historical_exists(&event).await? {
            return Err(PauseError::HistoricalEventNotFound {
                event_id: event_id.to_string(),
                key: historical_key(&event),
            });
        }

        event.resolve(who_cleared, PauseTimestamp::from_utc(self.clock.now()));
        self.store.put_historical(&event).await?;

        if let Err(err) = self.store.delete_current(&event).await {
            if self.store.current_exists(&event).await? {
                return Err(err.into());
            }
            tracing::warn!(
                "Deleting current record for event '{}' failed but it no longer exists: {}",
                event_id,
                err
            );
        }

        Ok(event.pipeline_system)
    }

    /// Phase 2 of `remove`: unpauses the system if no current events remain.
    ///
    /// Returns the number of events still pausing the system.
    pub async fn release_pipelines(&self, event_id: &str, pipeline_system: &str) -> Result<usize> {
        let remaining = self
            .store
            .list_current(Some(pipeline_system), None)
            .await?
            .len();

        if remaining > 0 {
            tracing::debug!(
                "{} pause event(s) still hold pipeline system '{}'",
                remaining,
                pipeline_system
            );
            return Ok(remaining);
        }

        let pipelines = match self.registry.pipelines_for(pipeline_system) {
            Some(pipelines) => pipelines,
            None => {
                tracing::warn!(
                    "Pipeline system '{}' is no longer configured - nothing to unpause",
                    pipeline_system
                );
                &[]
            }
        };

        for pipeline in pipelines {
            tracing::info!(
                "No events remaining for pipeline system '{}' after removing event '{}' - unpausing pipeline '{}'",
                pipeline_system,
                event_id,
                pipeline
            );
            self.control.unpause(pipeline).await?;
        }

        Ok(0)
    }

    /// Current pause events per pipeline system.
    ///
    /// A requested system is always present in the result. Unless
    /// `paused_only`, every configured system is present too, with an empty
    /// list when it is not paused.
    pub async fn status(
        &self,
        pipeline_system: Option<&str>,
        paused_only: bool,
    ) -> Result<SystemStatus> {
        let mut status = SystemStatus::new();
        for event in self.store.list_current(pipeline_system, None).await? {
            status
                .entry(event.pipeline_system.clone())
                .or_default()
                .push(event);
        }

        for events in status.values_mut() {
            events.sort_by(|a, b| {
                a.time_paused
                    .cmp(&b.time_paused)
                    .then_with(|| a.event_id.cmp(&b.event_id))
            });
        }

        if let Some(system) = pipeline_system {
            status.entry(system.to_string()).or_default();
        }

        if !paused_only {
            for system in self.registry.system_names() {
                status.entry(system.to_string()).or_default();
            }
        }

        tracing::info!(
            "Status for system {:?} (paused_only={}): {} system(s), {} paused",
            pipeline_system,
            paused_only,
            status.len(),
            status.values().filter(|events| !events.is_empty()).count()
        );

        Ok(status)
    }

    /// Recreates missing historical records from their current copies.
    ///
    /// Never touches the control plane.
    pub async fn reconcile(&self) -> Result<ReconcileReport> {
        let current = self.store.list_current(None, None).await?;
        let mut report = ReconcileReport {
            scanned: current.len(),
            repaired: Vec::new(),
        };

        for event in current {
            if self.store.historical_exists(&event).await? {
                continue;
            }

            tracing::warn!(
                "Pause event '{}' has no historical record - recreating {}",
                event.event_id,
                historical_key(&event)
            );
            self.store.put_historical(&event).await?;
            report.repaired.push(event.event_id);
        }

        tracing::info!(
            "Reconciled {} current pause event(s), repaired {}",
            report.scanned,
            report.repaired.len()
        );

        Ok(report)
    }
}

/// Short event ID: the last 8 hex digits of a SHA-1 over a nanosecond
/// timestamp and a random UUID.
fn generate_event_id(now: DateTime<Utc>) -> String {
    let seed = format!(
        "{}{}",
        now.to_rfc3339_opts(SecondsFormat::Nanos, true),
        Uuid::new_v4()
    );
    let digest = hex::encode(Sha1::digest(seed.as_bytes()));
    digest[digest.len() - 8..].to_string()
}
