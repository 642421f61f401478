//! SceneForge Protocol - Shared types for the engine and its renderer
//!
//! This crate contains the types exchanged with the rendering collaborator:
//! - The declarative render model the engine produces every frame
//! - Raw player events the renderer reports back
//! - Engine messages wrapping frames and diagnostics
//!
//! # Design Principles
//!
//! 1. **No business logic** - Pure data types and serialization
//! 2. **No domain IDs** - plain strings for ids, so renderers need not know
//!    the domain newtypes; domain value objects (visuals, positions) are
//!    reused as vocabulary

pub mod messages;
pub mod render;

pub use messages::{EngineMessage, InteractionSignal, PlayerEvent};
pub use render::{
    DialogChoice, DialogView, InventoryEntry, ObjectAction, PanelView, RenderModel,
    RenderedObject,
};
