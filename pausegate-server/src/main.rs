//! Pausegate Server
//!
//! Pauses and resumes groups of continuous-delivery pipelines on request.
//!
//! Architecture:
//! - Store: key/blob storage (S3 or filesystem via OpenDAL, or in-memory)
//! - Repository: pause event records on top of the store
//! - Control: the control plane that actually pauses pipelines (GoCD)
//! - Service: the pause coordinator
//! - API: HTTP endpoints over the coordinator

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod control;
pub mod repository;
pub mod service;
pub mod store;

use crate::config::Config;
use crate::repository::PauseEventStore;
use crate::service::PauseCoordinator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pausegate_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pausegate Server...");

    let config = Config::from_env()?;
    config.validate()?;

    let registry = config.load_registry()?;
    tracing::info!(
        "Loaded {} pipeline system(s): {}",
        registry.len(),
        registry.describe_known()
    );

    let objects = store::open(&config.store).context("Failed to open object store")?;
    let control = control::connect(&config.control).context("Failed to set up control plane")?;

    let coordinator = Arc::new(PauseCoordinator::new(
        PauseEventStore::new(objects),
        control,
        registry,
    ));

    if config.reconcile_on_start {
        let report = coordinator
            .reconcile()
            .await
            .context("Startup reconciliation failed")?;
        tracing::info!(
            "Startup reconciliation: scanned {}, repaired {:?}",
            report.scanned,
            report.repaired
        );
    }

    // Build router with all API endpoints
    let app = api::create_router(coordinator);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
