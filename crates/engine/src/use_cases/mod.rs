//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of play.
//! Use cases orchestrate across entity modules and the session store.

pub mod events;
pub mod interaction;
pub mod resolution;
pub mod session;

pub use events::{EventError, EventRouter};
pub use interaction::{
    DispatchError, DispatchReport, IgnoreReason, InteractionDispatcher, InteractionOutcome,
    MismatchReason,
};
pub use session::{SessionUseCases, StartSession};
