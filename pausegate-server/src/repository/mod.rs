//! Repository Module
//!
//! Data access layer for the pausegate server.

pub mod pause_event;

// Re-export for convenience
pub use pause_event::{PauseEventStore, StoreError};
