//! Pause event endpoints

use pausegate_core::dto::pause::{
    AddPauseEvent, PauseEventAdded, ReconcileReport, RemoveStatus, ResolvePauseEvent,
};

use crate::PauseGateClient;
use crate::error::Result;

impl PauseGateClient {
    // =============================================================================
    // Pause Events
    // =============================================================================

    /// Pause every pipeline of a pipeline system
    ///
    /// # Returns
    /// The ID of the new pause event
    pub async fn pause_system(
        &self,
        who: &str,
        pipeline_system: &str,
        reason: &str,
    ) -> Result<PauseEventAdded> {
        let url = format!("{}/api/pause", self.base_url);
        let req = AddPauseEvent {
            who: who.to_string(),
            pipeline_system: pipeline_system.to_string(),
            reason: reason.to_string(),
        };
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Resolve a pause event
    ///
    /// The system is unpaused when this was its last pause event.
    pub async fn resolve_event(&self, who: &str, event_id: &str) -> Result<RemoveStatus> {
        let url = format!("{}/api/pause/{}/resolve", self.base_url, event_id);
        let req = ResolvePauseEvent {
            who: who.to_string(),
        };
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Recreate missing historical records on the server
    pub async fn reconcile(&self) -> Result<ReconcileReport> {
        let url = format!("{}/api/reconcile", self.base_url);
        let response = self.client.post(&url).send().await?;

        self.handle_response(response).await
    }
}
