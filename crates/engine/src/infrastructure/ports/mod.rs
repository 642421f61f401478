//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Save-game storage (could swap SQLite -> browser storage)
//! - Clock (save timestamps, mocked in tests)

mod clock;
mod error;
mod storage;

pub use clock::ClockPort;
pub use error::StorageError;
pub use storage::KeyValueStore;

#[cfg(test)]
pub use clock::MockClockPort;
#[cfg(test)]
pub use storage::MockKeyValueStore;
