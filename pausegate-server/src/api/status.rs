//! Status API Handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use pausegate_core::domain::PipelineSystemRegistry;
use pausegate_core::dto::pause::{StatusQuery, SystemStatus};

use crate::api::error::ApiResult;
use crate::api::require_known_system;
use crate::service::PauseCoordinator;

/// GET /api/status
/// Current pause events per pipeline system
pub async fn get_status(
    State(coordinator): State<Arc<PauseCoordinator>>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<SystemStatus>> {
    tracing::debug!("Getting status: {:?}", query);

    if let Some(system) = &query.pipeline_system {
        require_known_system(&coordinator, system)?;
    }

    let status = coordinator
        .status(query.pipeline_system.as_deref(), query.paused_only)
        .await?;

    Ok(Json(status))
}

/// GET /api/systems
/// Configured pipeline systems and their pipelines
pub async fn list_systems(
    State(coordinator): State<Arc<PauseCoordinator>>,
) -> Json<PipelineSystemRegistry> {
    Json(coordinator.registry().clone())
}
