//! Resolution state - the mutable per-playthrough puzzle state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{GroupProgress, Inventory, ResolvedFlags};
use crate::{GroupId, ObjectId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionState {
    pub resolved_flags: ResolvedFlags,
    pub inventory: Inventory,
    /// Item currently held, correlating a select with the following receive.
    pub selected_item: Option<ObjectId>,
    pub group_progress: BTreeMap<GroupId, GroupProgress>,
}

impl ResolutionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved_flags.is_empty()
            && self.inventory.is_empty()
            && self.selected_item.is_none()
            && self.group_progress.is_empty()
    }

    /// Forget everything, including resolved flags.
    pub fn clear(&mut self) {
        self.resolved_flags.clear();
        self.inventory.clear();
        self.selected_item = None;
        self.group_progress.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InventoryItem;
    use crate::value_objects::Visual;
    use crate::Flag;

    #[test]
    fn clear_empties_every_part() {
        let mut state = ResolutionState::new();
        state.resolved_flags.insert(Flag::from("door"));
        state
            .inventory
            .push(InventoryItem::new("key", Visual::Trigger, Some(1)));
        state.selected_item = Some(ObjectId::from("key"));
        state
            .group_progress
            .insert(GroupId::from("bells"), GroupProgress::empty_sequence());
        assert!(!state.is_empty());

        state.clear();

        assert!(state.is_empty());
        assert_eq!(state, ResolutionState::default());
    }
}
