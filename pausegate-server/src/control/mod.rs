//! Pipeline Control Module
//!
//! Abstraction over the continuous-delivery control plane whose pipelines are
//! actually paused and unpaused.

mod gocd;
mod log;

#[cfg(test)]
pub mod fake;

pub use gocd::GoCdClient;
pub use log::LoggingControl;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ControlBackend;

/// Errors raised by control plane adapters
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Control plane request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Control plane refused to {action} pipeline '{pipeline}' (status {status}): {message}")]
    Rejected {
        action: &'static str,
        pipeline: String,
        status: u16,
        message: String,
    },
}

/// Remote pause/unpause of individual pipelines
#[async_trait]
pub trait PipelineControl: Send + Sync {
    /// Pauses `pipeline`, recording `reason` as the pause cause
    async fn pause(&self, pipeline: &str, reason: &str) -> Result<(), ControlError>;

    /// Unpauses `pipeline`
    async fn unpause(&self, pipeline: &str) -> Result<(), ControlError>;
}

/// Builds the configured control plane adapter
pub fn connect(backend: &ControlBackend) -> Result<Arc<dyn PipelineControl>, ControlError> {
    let control: Arc<dyn PipelineControl> = match backend {
        ControlBackend::GoCd {
            url,
            username,
            password,
            timeout,
        } => {
            tracing::info!("Using GoCD control plane at {}", url);
            Arc::new(GoCdClient::new(url, username, password, *timeout)?)
        }
        ControlBackend::Log => {
            tracing::warn!("No control plane configured - pipeline pauses are only logged");
            Arc::new(LoggingControl)
        }
    };

    Ok(control)
}
