//! Session state storage.
//!
//! The single mutable container of a playthrough. The dispatcher is its only
//! writer; readers take cloned snapshots. Every change bumps a revision
//! counter that renderers can watch.

use tokio::sync::{watch, RwLock};

use sceneforge_domain::{DialogNodeId, ObjectId, ResolutionState, Route, Scene, SessionId};
use sceneforge_shared::InteractionSignal;

/// Dialog currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDialog {
    pub object_id: ObjectId,
    pub node_id: DialogNodeId,
}

/// Transient presentation state, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UiState {
    pub inventory_open: bool,
    pub dialog: Option<ActiveDialog>,
    /// Paper object whose content panel is open.
    pub panel: Option<ObjectId>,
}

impl UiState {
    /// Close dialog and panel. Returns whether anything was open.
    pub fn close_overlays(&mut self) -> bool {
        let was_open = self.dialog.is_some() || self.panel.is_some();
        self.dialog = None;
        self.panel = None;
        was_open
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session_id: SessionId,
    pub resolution: ResolutionState,
    pub current_route: Route,
    /// Template clone of the current scene with group progress applied.
    pub working: Scene,
    pub ui: UiState,
    pub last_signal: Option<InteractionSignal>,
    /// Whether the last turn's writes all reached storage.
    pub last_durable: bool,
}

impl SessionState {
    pub fn new(resolution: ResolutionState, working: Scene) -> Self {
        Self {
            session_id: SessionId::new(),
            resolution,
            current_route: working.route.clone(),
            working,
            ui: UiState::default(),
            last_signal: None,
            last_durable: true,
        }
    }
}

/// Session wrapper for use cases.
pub struct SessionStore {
    state: RwLock<SessionState>,
    revision: watch::Sender<u64>,
}

impl SessionStore {
    pub fn new(state: SessionState) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(state),
            revision,
        }
    }

    /// Clone of the current state.
    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    /// Read a projection without cloning the whole state.
    pub async fn read<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// Mutate the state and notify watchers.
    pub async fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let result = f(&mut *self.state.write().await);
        self.revision.send_modify(|revision| *revision += 1);
        result
    }

    /// Mutate the state and notify watchers only if `f` succeeds.
    ///
    /// `f` must leave the state untouched when it returns an error.
    pub async fn try_update<T, E>(
        &self,
        f: impl FnOnce(&mut SessionState) -> Result<T, E>,
    ) -> Result<T, E> {
        let result = f(&mut *self.state.write().await);
        if result.is_ok() {
            self.revision.send_modify(|revision| *revision += 1);
        }
        result
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }
}
