//! Dispatcher errors.

use sceneforge_domain::{DialogNodeId, DomainError, ObjectId, ObjectKindTag, Route};

/// Malformed requests. Puzzle failures are outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Object not found in current scene: {0}")]
    UnknownObject(ObjectId),
    #[error("Object {id} is a {actual}, expected {expected}")]
    WrongKind {
        id: ObjectId,
        actual: ObjectKindTag,
        expected: &'static str,
    },
    #[error("Object {id} is not a member of group {group}")]
    WrongGroup { id: ObjectId, group: String },
    #[error("Unknown route: {0}")]
    UnknownRoute(Route),
    #[error("No dialog is open")]
    NoActiveDialog,
    #[error("Dialog node {0} is not a choice of the current node")]
    InvalidDialogChoice(DialogNodeId),
    #[error("Item not in inventory: {0}")]
    ItemNotInInventory(ObjectId),
    #[error("Invalid request: {0}")]
    Domain(#[from] DomainError),
}

impl DispatchError {
    pub fn wrong_kind(id: &ObjectId, actual: ObjectKindTag, expected: &'static str) -> Self {
        Self::WrongKind {
            id: id.clone(),
            actual,
            expected,
        }
    }
}
