//! API Module
//!
//! HTTP API layer for the pausegate server.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod pause;
pub mod status;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::error::ApiError;
use crate::service::PauseCoordinator;

/// Create the main API router with all endpoints
pub fn create_router(coordinator: Arc<PauseCoordinator>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Pipeline systems
        .route("/api/systems", get(status::list_systems))
        .route("/api/status", get(status::get_status))
        // Pause events
        .route("/api/pause", post(pause::add_pause))
        .route("/api/pause/{event_id}/resolve", post(pause::resolve_pause))
        .route("/api/reconcile", post(pause::reconcile))
        // Add state and middleware
        .with_state(coordinator)
        .layer(TraceLayer::new_for_http())
}

/// Rejects pipeline systems missing from the registry
pub(crate) fn require_known_system(
    coordinator: &PauseCoordinator,
    pipeline_system: &str,
) -> Result<(), ApiError> {
    let registry = coordinator.registry();
    if registry.contains(pipeline_system) {
        return Ok(());
    }

    Err(ApiError::NotFound(format!(
        "Pipeline system '{}' is unknown. Known systems: {}",
        pipeline_system,
        registry.describe_known()
    )))
}
