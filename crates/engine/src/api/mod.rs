//! API layer - the renderer-facing entry point.

pub mod stdio;

pub use stdio::serve;
