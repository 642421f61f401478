//! SceneForge domain: scene catalog, object rules and resolution state.
//!
//! Everything here is synchronous and free of I/O. The engine crate owns
//! persistence, sessions and dispatch.

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use aggregates::{CatalogDocument, SceneCatalog, RESERVED_GROUP_IDS};

pub use entities::{
    DialogNode, GroupProgress, Inventory, InventoryItem, ObjectKind, ObjectKindTag,
    ResolutionState, ResolvedFlags, Scenario, Scene, SceneObject, SlotOption,
};

pub use error::{CatalogError, CatalogIssue, DomainError};

pub use ids::{DialogNodeId, Flag, GroupId, ObjectId, OptionId, Route, SessionId};

pub use value_objects::{
    GatingRules, LocalizedText, Position, SoundCue, SoundTrigger, Visual, FALLBACK_LOCALE,
};
