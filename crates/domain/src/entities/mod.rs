//! Domain entities - scene content and the mutable resolution state

mod dialog;
mod group_progress;
mod inventory_item;
mod resolution_state;
mod resolved_flags;
mod scene;
mod scene_object;

pub use dialog::DialogNode;
pub use group_progress::GroupProgress;
pub use inventory_item::{Inventory, InventoryItem};
pub use resolution_state::ResolutionState;
pub use resolved_flags::ResolvedFlags;
pub use scene::Scene;
pub use scene_object::{ObjectKind, ObjectKindTag, Scenario, SceneObject, SlotOption};
