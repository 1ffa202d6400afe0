//! Recording control plane for tests

use std::sync::Mutex;

use async_trait::async_trait;

use super::{ControlError, PipelineControl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCall {
    Pause { pipeline: String, reason: String },
    Unpause { pipeline: String },
}

/// Records every call; optionally rejects them all
#[derive(Default)]
pub struct RecordingControl {
    calls: Mutex<Vec<ControlCall>>,
    reject_status: Option<u16>,
}

impl RecordingControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call is recorded, then rejected with `status`
    pub fn rejecting(status: u16) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reject_status: Some(status),
        }
    }

    pub fn calls(&self) -> Vec<ControlCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paused(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ControlCall::Pause { pipeline, reason } => Some((pipeline, reason)),
                ControlCall::Unpause { .. } => None,
            })
            .collect()
    }

    pub fn unpaused(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ControlCall::Unpause { pipeline } => Some(pipeline),
                ControlCall::Pause { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: ControlCall, action: &'static str, pipeline: &str) -> Result<(), ControlError> {
        self.calls.lock().unwrap().push(call);
        match self.reject_status {
            Some(status) => Err(ControlError::Rejected {
                action,
                pipeline: pipeline.to_string(),
                status,
                message: "rejected by test control plane".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PipelineControl for RecordingControl {
    async fn pause(&self, pipeline: &str, reason: &str) -> Result<(), ControlError> {
        let call = ControlCall::Pause {
            pipeline: pipeline.to_string(),
            reason: reason.to_string(),
        };
        self.record(call, "pause", pipeline)
    }

    async fn unpause(&self, pipeline: &str) -> Result<(), ControlError> {
        let call = ControlCall::Unpause {
            pipeline: pipeline.to_string(),
        };
        self.record(call, "unpause", pipeline)
    }
}
