//! Scene changes and full reset.

use std::collections::BTreeMap;

use sceneforge_domain::{GroupId, GroupProgress, Route, SceneCatalog};

use super::{Applied, DispatchError, InteractionOutcome};
use crate::entities::ProgressWrite;
use crate::stores::{SessionState, UiState};

/// Swap the working copy for a fresh clone of the target scene.
///
/// `hydrated` holds group progress read from storage for groups the session
/// had not seen yet. In-memory progress always wins.
pub(super) fn enter_scene(
    state: &mut SessionState,
    catalog: &SceneCatalog,
    route: &Route,
    hydrated: BTreeMap<GroupId, GroupProgress>,
) -> Result<Applied, DispatchError> {
    let template = catalog
        .scene(route)
        .ok_or_else(|| DispatchError::UnknownRoute(route.clone()))?;

    for (group_id, progress) in hydrated {
        state
            .resolution
            .group_progress
            .entry(group_id)
            .or_insert(progress);
    }

    let mut working = template.clone();
    working.apply_group_progress(&state.resolution.group_progress);
    state.working = working;
    state.current_route = route.clone();
    state.ui.close_overlays();

    Ok(Applied::new(InteractionOutcome::Navigated {
        route: route.clone(),
    }))
}

/// Forget all progress and restore the current scene from its template.
///
/// Every group of the catalog is cleared in storage, including groups this
/// session never visited.
pub(super) fn reset(state: &mut SessionState, catalog: &SceneCatalog) -> Applied {
    state.resolution.clear();
    if let Some(template) = catalog.scene(&state.current_route) {
        state.working = template.clone();
    }
    state.ui = UiState::default();

    let mut applied = Applied::new(InteractionOutcome::Reset)
        .write(ProgressWrite::Inventory(state.resolution.inventory.clone()))
        .write(ProgressWrite::Resolved(state.resolution.resolved_flags.clone()))
        .write(ProgressWrite::SelectedItem(None));
    for group_id in catalog.group_ids() {
        applied = applied.write(ProgressWrite::Group(group_id.clone(), None));
    }
    applied
}
