//! Progress entity module.
//!
//! Typed access to the save-game keys. Each piece of `ResolutionState` lives
//! under its own key so a single mutation rewrites only what changed:
//!
//! | key | value |
//! |---|---|
//! | `inventory` | JSON array of item snapshots |
//! | `resolved` | JSON array of flags, in resolution order |
//! | `selectedItem` | raw item id, absent when nothing is held |
//! | `<group id>` | JSON group progress record |

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use sceneforge_domain::{GroupId, GroupProgress, Inventory, ObjectId, ResolutionState, ResolvedFlags};

use crate::infrastructure::ports::{KeyValueStore, StorageError};

pub const INVENTORY_KEY: &str = "inventory";
pub const RESOLVED_KEY: &str = "resolved";
pub const SELECTED_ITEM_KEY: &str = "selectedItem";

/// One pending write, carrying the value as it was when the turn applied.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressWrite {
    Inventory(Inventory),
    Resolved(ResolvedFlags),
    /// `None` removes the key.
    SelectedItem(Option<ObjectId>),
    /// `None` removes the key.
    Group(GroupId, Option<GroupProgress>),
}

impl ProgressWrite {
    pub fn key(&self) -> &str {
        match self {
            Self::Inventory(_) => INVENTORY_KEY,
            Self::Resolved(_) => RESOLVED_KEY,
            Self::SelectedItem(_) => SELECTED_ITEM_KEY,
            Self::Group(group_id, _) => group_id.as_str(),
        }
    }
}

/// Progress entity - reads and writes the save-game keys.
pub struct Progress {
    store: Arc<dyn KeyValueStore>,
}

impl Progress {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the whole saved state.
    ///
    /// A key that cannot be read or decoded is logged and treated as absent,
    /// so one damaged entry does not discard the rest of the save.
    pub async fn load<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a GroupId>,
    ) -> ResolutionState {
        let mut state = ResolutionState::new();

        if let Some(inventory) = self.read_or_warn::<Inventory>(INVENTORY_KEY).await {
            state.inventory = inventory;
        }
        if let Some(flags) = self.read_or_warn::<ResolvedFlags>(RESOLVED_KEY).await {
            state.resolved_flags = flags;
        }
        state.selected_item = match self.store.get(SELECTED_ITEM_KEY).await {
            Ok(value) => value
                .filter(|v| !v.is_empty())
                .map(ObjectId::from)
                .filter(|id| state.inventory.usable(id).is_some()),
            Err(e) => {
                tracing::warn!(error = %e, key = SELECTED_ITEM_KEY, "Failed to load saved progress");
                None
            }
        };
        for group_id in groups {
            if let Some(progress) = self.read_or_warn::<GroupProgress>(group_id.as_str()).await {
                state.group_progress.insert(group_id.clone(), progress);
            }
        }

        state
    }

    /// Read one group's saved progress.
    pub async fn load_group(&self, group_id: &GroupId) -> Result<Option<GroupProgress>, StorageError> {
        self.read(group_id.as_str()).await
    }

    pub async fn write(&self, write: &ProgressWrite) -> Result<(), StorageError> {
        let key = write.key();
        match write {
            ProgressWrite::Inventory(inventory) => self.write_json(key, inventory).await,
            ProgressWrite::Resolved(flags) => self.write_json(key, flags).await,
            ProgressWrite::SelectedItem(Some(id)) => self.store.set(key, id.as_str()).await,
            ProgressWrite::Group(_, Some(progress)) => self.write_json(key, progress).await,
            ProgressWrite::SelectedItem(None) | ProgressWrite::Group(_, None) => {
                self.store.remove(key).await
            }
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::serialization(key, e))
    }

    async fn read_or_warn<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.read(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, key, "Failed to load saved progress");
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::serialization(key, e))?;
        self.store.set(key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryKeyValueStore;
    use crate::infrastructure::ports::MockKeyValueStore;
    use sceneforge_domain::{Flag, InventoryItem, Visual, RESERVED_GROUP_IDS};

    #[test]
    fn fixed_keys_are_reserved_for_groups() {
        for key in [INVENTORY_KEY, RESOLVED_KEY, SELECTED_ITEM_KEY] {
            assert!(RESERVED_GROUP_IDS.contains(&key), "{key} must be reserved");
        }
    }

    #[tokio::test]
    async fn writes_then_loads_every_key() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let progress = Progress::new(store.clone());
        let bells = GroupId::from("bells");

        let inventory: Inventory = [InventoryItem::new("key", Visual::Trigger, Some(1))]
            .into_iter()
            .collect();
        let flags: ResolvedFlags = [Flag::from("door")].into_iter().collect();
        let sequence = GroupProgress::Sequence {
            buffer: vec![ObjectId::from("x")],
        };

        for write in [
            ProgressWrite::Inventory(inventory.clone()),
            ProgressWrite::Resolved(flags.clone()),
            ProgressWrite::SelectedItem(Some(ObjectId::from("key"))),
            ProgressWrite::Group(bells.clone(), Some(sequence.clone())),
        ] {
            progress.write(&write).await.unwrap();
        }

        let state = progress.load([&bells]).await;
        assert_eq!(state.inventory, inventory);
        assert_eq!(state.resolved_flags, flags);
        assert_eq!(state.selected_item, Some(ObjectId::from("key")));
        assert_eq!(state.group_progress.get(&bells), Some(&sequence));
        assert_eq!(store.dump().await.get("selectedItem").map(String::as_str), Some("key"));
    }

    #[tokio::test]
    async fn none_values_remove_keys() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let progress = Progress::new(store.clone());
        store.set("selectedItem", "key").await.unwrap();
        store.set("bells", r#"{"kind":"sequence","buffer":[]}"#).await.unwrap();

        progress.write(&ProgressWrite::SelectedItem(None)).await.unwrap();
        progress
            .write(&ProgressWrite::Group(GroupId::from("bells"), None))
            .await
            .unwrap();

        assert!(store.dump().await.is_empty());
    }

    #[tokio::test]
    async fn damaged_keys_are_skipped_on_load() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set("inventory", "not json").await.unwrap();
        store.set("resolved", r#"["door"]"#).await.unwrap();
        store.set("selectedItem", "key").await.unwrap();

        let state = Progress::new(store).load(Vec::<&GroupId>::new()).await;

        assert!(state.inventory.is_empty());
        assert!(state.resolved_flags.contains(&Flag::from("door")));
        // Held item must still be in the inventory.
        assert_eq!(state.selected_item, None);
    }

    #[tokio::test]
    async fn when_store_fails_returns_error() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .withf(|key| key == "bells")
            .returning(|_| Err(StorageError::backend("get", "disk gone")));

        let progress = Progress::new(Arc::new(store));
        let result = progress.load_group(&GroupId::from("bells")).await;

        assert!(matches!(result, Err(StorageError::Backend { .. })));
    }
}
