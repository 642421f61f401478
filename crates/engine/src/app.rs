//! Application state and composition.

use std::sync::Arc;

use sceneforge_domain::SceneCatalog;

use crate::entities::Progress;
use crate::infrastructure::ports::KeyValueStore;
use crate::stores::SessionStore;
use crate::use_cases::session::StartSessionError;
use crate::use_cases::{EventRouter, InteractionDispatcher, SessionUseCases, StartSession};

/// Main application state.
///
/// One playthrough: the catalog, its session and the use cases acting on it.
pub struct App {
    pub catalog: Arc<SceneCatalog>,
    pub session: Arc<SessionStore>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub session: SessionUseCases,
    pub dispatcher: Arc<InteractionDispatcher>,
    pub events: Arc<EventRouter>,
}

impl App {
    /// Wire everything up and start the session from the save in `store`.
    pub async fn start(
        catalog: SceneCatalog,
        store: Arc<dyn KeyValueStore>,
        locale: &str,
    ) -> Result<Self, StartSessionError> {
        let catalog = Arc::new(catalog);
        let progress = Arc::new(Progress::new(store));

        let session_use_cases = SessionUseCases::new(Arc::new(StartSession::new(
            catalog.clone(),
            progress.clone(),
        )));
        let session = Arc::new(SessionStore::new(session_use_cases.start.execute().await?));

        let dispatcher = Arc::new(InteractionDispatcher::new(
            catalog.clone(),
            session.clone(),
            progress,
        ));
        let events = Arc::new(EventRouter::new(dispatcher.clone(), locale));

        Ok(Self {
            catalog,
            session,
            use_cases: UseCases {
                session: session_use_cases,
                dispatcher,
                events,
            },
        })
    }
}
