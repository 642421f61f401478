//! Session use cases.
//!
//! Orchestrates session-level flows (starting a playthrough from the save).

use std::sync::Arc;

mod start_session;

pub use start_session::{StartSession, StartSessionError};

/// Container for session use cases.
pub struct SessionUseCases {
    pub start: Arc<StartSession>,
}

impl SessionUseCases {
    pub fn new(start: Arc<StartSession>) -> Self {
        Self { start }
    }
}
