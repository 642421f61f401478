//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),
}

impl DomainError {
    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// One problem found while validating a scene catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    #[error("initial route '{route}' does not name a scene")]
    MissingInitialRoute { route: String },

    #[error("route '{route}' is declared by more than one scene")]
    DuplicateRoute { route: String },

    #[error("[{scene}] object id '{id}' is used more than once")]
    DuplicateObjectId { scene: String, id: String },

    #[error("[{scene}] {kind} object #{index} has no id")]
    MissingObjectId {
        scene: String,
        index: usize,
        kind: String,
    },

    #[error("[{scene}] {kind} '{id}' has no group id")]
    MissingGroupId {
        scene: String,
        id: String,
        kind: String,
    },

    #[error("[{scene}] group '{group}' is a reserved storage key")]
    ReservedGroupId { scene: String, group: String },

    #[error("group '{group}' appears in both '{first}' and '{second}'")]
    GroupInSeveralScenes {
        group: String,
        first: String,
        second: String,
    },

    #[error("[{scene}] group '{group}' mixes slot and sequence members")]
    MixedGroupKinds { scene: String, group: String },

    #[error("[{scene}] group '{group}' has {count} primary members, expected exactly one")]
    PrimaryCount {
        scene: String,
        group: String,
        count: usize,
    },

    #[error("[{scene}] primary of group '{group}' needs {expected} scenario")]
    ScenarioShape {
        scene: String,
        group: String,
        expected: &'static str,
    },

    #[error("[{scene}] scenario of group '{group}' names '{member}', which is not a member")]
    UnknownScenarioMember {
        scene: String,
        group: String,
        member: String,
    },

    #[error("[{scene}] scenario of group '{group}' expects option '{option}' that slot '{slot}' does not have")]
    UnknownScenarioOption {
        scene: String,
        group: String,
        slot: String,
        option: String,
    },

    #[error("[{scene}] slot '{slot}' in group '{group}' has no target in the scenario")]
    SlotWithoutTarget {
        scene: String,
        group: String,
        slot: String,
    },

    #[error("[{scene}] slot '{id}' has no options")]
    EmptySlotOptions { scene: String, id: String },

    #[error("[{scene}] slot '{id}' selects unknown option '{option}'")]
    InvalidSlotSelection {
        scene: String,
        id: String,
        option: String,
    },

    #[error("[{scene}] receiver '{receiver}' expects '{item}', which is not a collectable or draggable")]
    UnknownExpectedValue {
        scene: String,
        receiver: String,
        item: String,
    },

    #[error("[{scene}] nav points at unknown route '{route}'")]
    DanglingRoute { scene: String, route: String },

    #[error("[{scene}] dialog '{object}' repeats node id '{node}'")]
    DuplicateDialogNode {
        scene: String,
        object: String,
        node: String,
    },
}

/// Load-time validation failure carrying every issue found.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("scene catalog is invalid ({} issue(s)): {}", .issues.len(), summarize(.issues))]
pub struct CatalogError {
    pub issues: Vec<CatalogIssue>,
}

impl CatalogError {
    pub fn new(issues: Vec<CatalogIssue>) -> Self {
        Self { issues }
    }
}

fn summarize(issues: &[CatalogIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
