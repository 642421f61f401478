//! Start session use case.
//!
//! Builds the first `SessionState` of a playthrough: saved progress laid over
//! a clone of the initial scene.

use std::sync::Arc;

use sceneforge_domain::{Route, SceneCatalog};

use crate::entities::Progress;
use crate::stores::SessionState;

#[derive(Debug, thiserror::Error)]
pub enum StartSessionError {
    #[error("Initial scene not found: {0}")]
    SceneNotFound(Route),
}

pub struct StartSession {
    catalog: Arc<SceneCatalog>,
    progress: Arc<Progress>,
}

impl StartSession {
    pub fn new(catalog: Arc<SceneCatalog>, progress: Arc<Progress>) -> Self {
        Self { catalog, progress }
    }

    /// Load the save and enter the catalog's initial scene.
    ///
    /// Only groups of the initial scene are read here; other scenes hydrate
    /// their groups when first entered.
    pub async fn execute(&self) -> Result<SessionState, StartSessionError> {
        let route = self.catalog.initial_route();
        let template = self
            .catalog
            .scene(route)
            .ok_or_else(|| StartSessionError::SceneNotFound(route.clone()))?;

        let resolution = self.progress.load(template.groups()).await;
        let mut working = template.clone();
        working.apply_group_progress(&resolution.group_progress);

        let state = SessionState::new(resolution, working);
        tracing::info!(
            session_id = %state.session_id,
            route = %route,
            flags = state.resolution.resolved_flags.len(),
            items = state.resolution.inventory.len(),
            "Session started"
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryKeyValueStore;
    use crate::infrastructure::ports::{KeyValueStore, MockKeyValueStore, StorageError};
    use crate::test_fixtures::scenes;
    use sceneforge_domain::{Flag, ObjectId, Visual};

    #[tokio::test]
    async fn fresh_save_starts_in_initial_scene() {
        let catalog = Arc::new(scenes::catalog());
        let progress = Arc::new(Progress::new(Arc::new(InMemoryKeyValueStore::new())));

        let state = StartSession::new(catalog.clone(), progress)
            .execute()
            .await
            .unwrap();

        assert_eq!(state.current_route.as_str(), "room");
        assert!(state.resolution.is_empty());
        assert_eq!(&state.working, catalog.scene(catalog.initial_route()).unwrap());
        assert!(state.last_durable);
    }

    #[tokio::test]
    async fn saved_progress_is_restored() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set("resolved", r#"["door"]"#).await.unwrap();
        store
            .set("puzzle1", r#"{"kind":"slots","selections":{"slot1_2":2}}"#)
            .await
            .unwrap();
        let catalog = scenes::catalog()
            .with_initial_route("trash".into())
            .unwrap();

        let state = StartSession::new(Arc::new(catalog), Arc::new(Progress::new(store)))
            .execute()
            .await
            .unwrap();

        assert!(state.resolution.resolved_flags.contains(&Flag::from("door")));
        let slot = state.working.object(&ObjectId::from("slot1_2")).unwrap();
        assert_eq!(slot.display_visual(), &Visual::image("slot-2.png"));
    }

    #[tokio::test]
    async fn unreadable_save_starts_empty() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::backend("get", "locked")));
        let catalog = Arc::new(scenes::catalog());

        let state = StartSession::new(catalog, Arc::new(Progress::new(Arc::new(store))))
            .execute()
            .await
            .unwrap();

        assert!(state.resolution.is_empty());
    }
}
