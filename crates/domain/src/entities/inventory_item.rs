//! Inventory item - snapshot of a collected object.
//!
//! The snapshot keeps its own use counter so one definition can be collected
//! and consumed independently of the scene template.

use serde::{Deserialize, Serialize};

use crate::value_objects::Visual;
use crate::ObjectId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ObjectId,
    #[serde(default)]
    pub visual: Visual,
    /// `None` means unlimited uses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_remaining: Option<u32>,
}

impl InventoryItem {
    pub fn new(id: impl Into<ObjectId>, visual: Visual, uses_remaining: Option<u32>) -> Self {
        Self {
            id: id.into(),
            visual,
            uses_remaining,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.uses_remaining != Some(0)
    }

    /// Spend one use. Unlimited items are unaffected.
    pub fn consume_use(&mut self) {
        if let Some(uses) = self.uses_remaining.as_mut() {
            *uses = uses.saturating_sub(1);
        }
    }
}

/// Ordered list of collected items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(Vec<InventoryItem>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: InventoryItem) {
        self.0.push(item);
    }

    /// Whether any entry (usable or spent) was collected from `id`.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.0.iter().any(|item| &item.id == id)
    }

    /// First entry for `id` that still has uses left.
    pub fn usable(&self, id: &ObjectId) -> Option<&InventoryItem> {
        self.0.iter().find(|item| &item.id == id && item.is_usable())
    }

    pub fn usable_mut(&mut self, id: &ObjectId) -> Option<&mut InventoryItem> {
        self.0
            .iter_mut()
            .find(|item| &item.id == id && item.is_usable())
    }

    /// Items shown in the inventory panel.
    pub fn usable_items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.0.iter().filter(|item| item.is_usable())
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<InventoryItem> for Inventory {
    fn from_iter<T: IntoIterator<Item = InventoryItem>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
