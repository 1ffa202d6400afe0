//! Pause API Handlers
//!
//! HTTP endpoints that change pause state.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use pausegate_core::dto::pause::{
    AddPauseEvent, PauseEventAdded, ReconcileReport, RemoveStatus, ResolvePauseEvent,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::require_known_system;
use crate::service::PauseCoordinator;

/// POST /api/pause
/// Pause a pipeline system
pub async fn add_pause(
    State(coordinator): State<Arc<PauseCoordinator>>,
    Json(req): Json<AddPauseEvent>,
) -> ApiResult<Json<PauseEventAdded>> {
    if req.who.trim().is_empty() {
        return Err(ApiError::BadRequest("who cannot be empty".to_string()));
    }
    require_known_system(&coordinator, &req.pipeline_system)?;

    tracing::info!(
        "Pausing pipeline system '{}' for '{}'",
        req.pipeline_system,
        req.who
    );

    let added = coordinator
        .add(&req.who, &req.pipeline_system, &req.reason)
        .await?;

    Ok(Json(added))
}

/// POST /api/pause/{event_id}/resolve
/// Resolve a pause event
pub async fn resolve_pause(
    State(coordinator): State<Arc<PauseCoordinator>>,
    Path(event_id): Path<String>,
    Json(req): Json<ResolvePauseEvent>,
) -> ApiResult<Json<RemoveStatus>> {
    if req.who.trim().is_empty() {
        return Err(ApiError::BadRequest("who cannot be empty".to_string()));
    }

    tracing::info!("Resolving pause event '{}' for '{}'", event_id, req.who);

    let status = coordinator.remove(&req.who, &event_id).await?;

    Ok(Json(status))
}

/// POST /api/reconcile
/// Recreate missing historical records
pub async fn reconcile(
    State(coordinator): State<Arc<PauseCoordinator>>,
) -> ApiResult<Json<ReconcileReport>> {
    let report = coordinator.reconcile().await?;
    Ok(Json(report))
}
