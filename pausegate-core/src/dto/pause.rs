//! Pause DTOs exchanged between the pausegate server and its clients

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::pause_event::PauseEvent;

/// Request to pause a pipeline system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPauseEvent {
    pub who: String,
    pub pipeline_system: String,
    pub reason: String,
}

/// Response to a successful pause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseEventAdded {
    pub event_id: String,
}

/// Request to resolve a pause event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvePauseEvent {
    pub who: String,
}

/// Outcome of removing a pause event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveStatus {
    pub pipeline_system: String,
    /// True if this removal unpaused the pipeline system
    pub unpaused: bool,
    pub num_remaining_events: usize,
}

/// Query parameters for a status request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_system: Option<String>,
    #[serde(default)]
    pub paused_only: bool,
}

/// Active pause events keyed by pipeline system.
///
/// An empty list means the system is not paused.
pub type SystemStatus = BTreeMap<String, Vec<PauseEvent>>;

/// Result of a reconciliation sweep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Number of current records examined
    pub scanned: usize,
    /// Event IDs whose missing historical copy was recreated
    pub repaired: Vec<String>,
}
