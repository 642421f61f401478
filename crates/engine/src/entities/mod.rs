//! Entity modules wrapping port operations with domain types.

pub mod progress;

pub use progress::{Progress, ProgressWrite};
