//! Control plane stand-in that only logs

use async_trait::async_trait;

use super::{ControlError, PipelineControl};

/// Logs pause/unpause requests without contacting anything
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingControl;

#[async_trait]
impl PipelineControl for LoggingControl {
    async fn pause(&self, pipeline: &str, reason: &str) -> Result<(), ControlError> {
        tracing::info!("[dry run] pause pipeline '{}' with cause '{}'", pipeline, reason);
        Ok(())
    }

    async fn unpause(&self, pipeline: &str) -> Result<(), ControlError> {
        tracing::info!("[dry run] unpause pipeline '{}'", pipeline);
        Ok(())
    }
}
