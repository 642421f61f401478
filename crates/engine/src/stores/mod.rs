//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in the database:
//! - `SessionStore` - the playthrough's resolution state, working scene and overlays

pub mod session;

pub use session::{ActiveDialog, SessionState, SessionStore, UiState};
