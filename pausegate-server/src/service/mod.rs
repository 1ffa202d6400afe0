//! Service Module
//!
//! Business logic layer for the pausegate server.

pub mod clock;
pub mod coordinator;

// Re-export for convenience
pub use clock::{Clock, SystemClock};
pub use coordinator::{PauseCoordinator, PauseError};
