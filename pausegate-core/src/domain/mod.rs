//! Core domain types
//!
//! These types are shared between the server (which persists pause events and
//! drives the control plane) and the client/CLI (which display them).

pub mod pause_event;
pub mod pipeline_system;

pub use pause_event::{EventState, PauseEvent, PauseTimestamp};
pub use pipeline_system::{PipelineSystemRegistry, RegistryError};
