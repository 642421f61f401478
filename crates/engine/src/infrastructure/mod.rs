//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod catalog_loader;
pub mod clock;
pub mod config;
pub mod persistence;
pub mod ports;
