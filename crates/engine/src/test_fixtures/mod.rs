//! Shared test helpers.

pub mod scenes;

use std::sync::Arc;

use sceneforge_domain::{ResolutionState, Route, SceneCatalog};

use crate::entities::Progress;
use crate::infrastructure::persistence::InMemoryKeyValueStore;
use crate::infrastructure::ports::KeyValueStore;
use crate::stores::{SessionState, SessionStore};
use crate::use_cases::interaction::InteractionDispatcher;

/// A dispatcher over the fixture catalog, positioned in one scene.
pub struct Harness {
    pub catalog: Arc<SceneCatalog>,
    pub session: Arc<SessionStore>,
    pub dispatcher: InteractionDispatcher,
}

impl Harness {
    /// Fresh session in `route`, saving to `store`.
    pub fn with_store(route: &str, store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = Arc::new(scenes::catalog());
        let working = catalog
            .scene(&Route::from(route))
            .cloned()
            .expect("fixture route exists");
        let session = Arc::new(SessionStore::new(SessionState::new(
            ResolutionState::new(),
            working,
        )));
        let dispatcher = InteractionDispatcher::new(
            catalog.clone(),
            session.clone(),
            Arc::new(Progress::new(store)),
        );
        Self {
            catalog,
            session,
            dispatcher,
        }
    }

    /// Fresh session in `route` with an in-memory save, returned for inspection.
    pub fn in_memory(route: &str) -> (Self, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        (Self::with_store(route, store.clone()), store)
    }

    pub async fn state(&self) -> SessionState {
        self.session.snapshot().await
    }
}
