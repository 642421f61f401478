//! SceneForge Engine library.
//!
//! This crate contains the runtime of the scene engine.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping save-game storage
//! - `stores/` - The in-memory session state
//! - `use_cases/` - Resolution, interaction dispatch and event routing
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - JSON-lines entry point for the renderer
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
