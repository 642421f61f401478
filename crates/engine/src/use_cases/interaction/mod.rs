//! Interaction dispatcher.
//!
//! The single entry point for everything a player does. Operations are
//! serialized by a turn lock: each one mutates the session in memory, then
//! awaits the storage writes it produced, in order, before the next turn may
//! start. A failed write is logged and reported as non-durable; memory is not
//! rolled back.

mod error;
mod items;
mod navigation;
mod overlays;
mod puzzles;
mod types;


pub use error::DispatchError;
pub use types::{DispatchReport, IgnoreReason, InteractionOutcome, MismatchReason};

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;

use sceneforge_domain::{
    DialogNodeId, GroupId, GroupProgress, ObjectId, Route, Scene, SceneCatalog, SceneObject,
};

use crate::entities::{Progress, ProgressWrite};
use crate::stores::{SessionState, SessionStore};

/// Effect of one operation on the in-memory state.
struct Applied {
    outcome: InteractionOutcome,
    writes: Vec<ProgressWrite>,
}

impl Applied {
    fn new(outcome: InteractionOutcome) -> Self {
        Self {
            outcome,
            writes: Vec::new(),
        }
    }

    fn mismatch(reason: MismatchReason) -> Self {
        Self::new(InteractionOutcome::Mismatch(reason))
    }

    fn ignored(reason: IgnoreReason) -> Self {
        Self::new(InteractionOutcome::Ignored(reason))
    }

    fn write(mut self, write: ProgressWrite) -> Self {
        self.writes.push(write);
        self
    }
}

fn find_object<'a>(scene: &'a Scene, id: &ObjectId) -> Result<&'a SceneObject, DispatchError> {
    scene
        .object(id)
        .ok_or_else(|| DispatchError::UnknownObject(id.clone()))
}

pub struct InteractionDispatcher {
    catalog: Arc<SceneCatalog>,
    session: Arc<SessionStore>,
    progress: Arc<Progress>,
    turn: Mutex<()>,
}

impl InteractionDispatcher {
    pub fn new(
        catalog: Arc<SceneCatalog>,
        session: Arc<SessionStore>,
        progress: Arc<Progress>,
    ) -> Self {
        Self {
            catalog,
            session,
            progress,
            turn: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Move to another scene. An empty route is an inert hotspot.
    #[instrument(skip(self), fields(route = %route))]
    pub async fn navigate(&self, route: &Route) -> Result<DispatchReport, DispatchError> {
        let _turn = self.turn.lock().await;

        if route.as_str().trim().is_empty() {
            return self
                .apply("navigate", |_, _| Ok(Applied::ignored(IgnoreReason::InertNav)))
                .await;
        }
        let hydrated = match self.catalog.scene(route) {
            Some(scene) => self.hydrate(scene).await,
            None => BTreeMap::new(),
        };

        self.apply("navigate", |state, catalog| {
            navigation::enter_scene(state, catalog, route, hydrated)
        })
        .await
    }

    #[instrument(skip(self), fields(object_id = %object_id))]
    pub async fn collect(&self, object_id: &ObjectId) -> Result<DispatchReport, DispatchError> {
        self.run("collect", |state, _| items::collect(state, object_id))
            .await
    }

    /// Offer `held_item` to a receiver. Empty hands are a mismatch.
    #[instrument(skip(self), fields(receiver_id = %receiver_id))]
    pub async fn receive(
        &self,
        receiver_id: &ObjectId,
        held_item: Option<&ObjectId>,
    ) -> Result<DispatchReport, DispatchError> {
        self.run("receive", |state, _| {
            items::receive(state, receiver_id, held_item)
        })
        .await
    }

    #[instrument(skip(self), fields(group_id = %group_id, object_id = %object_id))]
    pub async fn toggle_slot(
        &self,
        group_id: &GroupId,
        object_id: &ObjectId,
    ) -> Result<DispatchReport, DispatchError> {
        self.run("toggle_slot", |state, _| {
            puzzles::toggle_slot(state, group_id, object_id)
        })
        .await
    }

    #[instrument(skip(self), fields(group_id = %group_id, object_id = %object_id))]
    pub async fn advance_sequence(
        &self,
        group_id: &GroupId,
        object_id: &ObjectId,
    ) -> Result<DispatchReport, DispatchError> {
        self.run("advance_sequence", |state, _| {
            puzzles::advance_sequence(state, group_id, object_id)
        })
        .await
    }

    #[instrument(skip(self), fields(object_id = %object_id))]
    pub async fn open_dialog(&self, object_id: &ObjectId) -> Result<DispatchReport, DispatchError> {
        self.run("open_dialog", |state, _| overlays::open_dialog(state, object_id))
            .await
    }

    #[instrument(skip(self), fields(node_id = %node_id))]
    pub async fn choose_dialog_option(
        &self,
        node_id: &DialogNodeId,
    ) -> Result<DispatchReport, DispatchError> {
        self.run("choose_dialog_option", |state, _| {
            overlays::choose_dialog_option(state, node_id)
        })
        .await
    }

    #[instrument(skip(self), fields(object_id = %object_id))]
    pub async fn drop_draggable(
        &self,
        object_id: &ObjectId,
        group_id: Option<&GroupId>,
        x: f32,
        y: f32,
    ) -> Result<DispatchReport, DispatchError> {
        self.run("drop_draggable", |state, _| {
            items::drop_draggable(state, object_id, group_id, x, y)
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<DispatchReport, DispatchError> {
        self.run("reset", |state, catalog| Ok(navigation::reset(state, catalog)))
            .await
    }

    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn select_item(&self, item_id: &ObjectId) -> Result<DispatchReport, DispatchError> {
        self.run("select_item", |state, _| items::select_item(state, item_id))
            .await
    }

    pub async fn deselect_item(&self) -> Result<DispatchReport, DispatchError> {
        self.run("deselect_item", |state, _| Ok(items::deselect_item(state)))
            .await
    }

    #[instrument(skip(self), fields(object_id = %object_id))]
    pub async fn open_panel(&self, object_id: &ObjectId) -> Result<DispatchReport, DispatchError> {
        self.run("open_panel", |state, _| overlays::open_panel(state, object_id))
            .await
    }

    #[instrument(skip(self), fields(object_id = %object_id))]
    pub async fn toggle_decorative(
        &self,
        object_id: &ObjectId,
    ) -> Result<DispatchReport, DispatchError> {
        self.run("toggle_decorative", |state, _| {
            overlays::toggle_decorative(state, object_id)
        })
        .await
    }

    pub async fn close_overlay(&self) -> Result<DispatchReport, DispatchError> {
        self.run("close_overlay", |state, _| Ok(overlays::close_overlay(state)))
            .await
    }

    pub async fn toggle_inventory(&self) -> Result<DispatchReport, DispatchError> {
        self.run("toggle_inventory", |state, _| {
            Ok(overlays::toggle_inventory(state))
        })
        .await
    }

    /// Take the turn lock and apply one operation.
    async fn run<F>(&self, operation: &'static str, apply: F) -> Result<DispatchReport, DispatchError>
    where
        F: FnOnce(&mut SessionState, &SceneCatalog) -> Result<Applied, DispatchError>,
    {
        let _turn = self.turn.lock().await;
        self.apply(operation, apply).await
    }

    /// Apply in memory, then write through. Caller holds the turn lock.
    async fn apply<F>(
        &self,
        operation: &'static str,
        apply: F,
    ) -> Result<DispatchReport, DispatchError>
    where
        F: FnOnce(&mut SessionState, &SceneCatalog) -> Result<Applied, DispatchError>,
    {
        let catalog = self.catalog.as_ref();
        let Applied { outcome, writes } = self
            .session
            .try_update(|state| apply(state, catalog))
            .await
            .inspect_err(|e| tracing::debug!(operation, error = %e, "Interaction rejected"))?;

        let durable = self.persist(operation, &writes).await;
        let signal = outcome.signal();
        self.session
            .update(|state| {
                state.last_signal = signal;
                state.last_durable = durable;
            })
            .await;

        tracing::debug!(operation, ?outcome, writes = writes.len(), durable, "Interaction applied");
        Ok(DispatchReport { outcome, durable })
    }

    async fn persist(&self, operation: &'static str, writes: &[ProgressWrite]) -> bool {
        let mut durable = true;
        for write in writes {
            if let Err(e) = self.progress.write(write).await {
                tracing::warn!(
                    error = %e,
                    key = write.key(),
                    operation,
                    "Failed to save progress, keeping in-memory state"
                );
                durable = false;
            }
        }
        durable
    }

    /// Read stored progress for groups of `scene` the session has not loaded.
    async fn hydrate(&self, scene: &Scene) -> BTreeMap<GroupId, GroupProgress> {
        let missing: Vec<GroupId> = self
            .session
            .read(|state| {
                scene
                    .groups()
                    .into_iter()
                    .filter(|group_id| !state.resolution.group_progress.contains_key(*group_id))
                    .cloned()
                    .collect()
            })
            .await;

        let mut hydrated = BTreeMap::new();
        for group_id in missing {
            match self.progress.load_group(&group_id).await {
                Ok(Some(progress)) => {
                    hydrated.insert(group_id, progress);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, group_id = %group_id, "Failed to load group progress");
                }
            }
        }
        hydrated
    }
}
