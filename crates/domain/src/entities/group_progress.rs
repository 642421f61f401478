//! Group progress - per-group state of an unsolved multi-object puzzle.
//!
//! Stored under the group's own persistence key so a partially solved puzzle
//! survives leaving the scene.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ObjectId, OptionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GroupProgress {
    /// Current selection of every slot that has been toggled.
    Slots {
        selections: BTreeMap<ObjectId, OptionId>,
    },
    /// Members tapped so far, in order.
    Sequence { buffer: Vec<ObjectId> },
}

impl GroupProgress {
    pub fn empty_slots() -> Self {
        Self::Slots {
            selections: BTreeMap::new(),
        }
    }

    pub fn empty_sequence() -> Self {
        Self::Sequence { buffer: Vec::new() }
    }

    pub fn selection(&self, slot_id: &ObjectId) -> Option<&OptionId> {
        match self {
            Self::Slots { selections } => selections.get(slot_id),
            Self::Sequence { .. } => None,
        }
    }

    pub fn sequence_buffer(&self) -> &[ObjectId] {
        match self {
            Self::Sequence { buffer } => buffer,
            Self::Slots { .. } => &[],
        }
    }
}
