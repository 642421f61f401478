//! Dialogs, paper panels, decorative toggles and the inventory panel.

use sceneforge_domain::{DialogNode, DialogNodeId, Flag, ObjectId, ObjectKind, ResolutionState};

use super::{find_object, Applied};
use super::{DispatchError, IgnoreReason, InteractionOutcome};
use crate::entities::ProgressWrite;
use crate::stores::{ActiveDialog, SessionState};
use crate::use_cases::resolution::evaluate;

pub(super) fn open_dialog(state: &mut SessionState, id: &ObjectId) -> Result<Applied, DispatchError> {
    let object = find_object(&state.working, id)?;
    let ObjectKind::Dialog { dialog_tree } = &object.kind else {
        return Err(DispatchError::wrong_kind(id, object.tag(), "dialog"));
    };
    if !evaluate(object, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }

    let resolved = enter_node(&mut state.resolution, dialog_tree);
    state.ui.panel = None;
    state.ui.dialog = Some(ActiveDialog {
        object_id: id.clone(),
        node_id: dialog_tree.id.clone(),
    });

    let applied = Applied::new(InteractionOutcome::DialogOpened { object: id.clone() });
    Ok(match resolved {
        Some(_) => applied.write(ProgressWrite::Resolved(
            state.resolution.resolved_flags.clone(),
        )),
        None => applied,
    })
}

/// Follow one choice of the open dialog.
pub(super) fn choose_dialog_option(
    state: &mut SessionState,
    node_id: &DialogNodeId,
) -> Result<Applied, DispatchError> {
    let active = state.ui.dialog.clone().ok_or(DispatchError::NoActiveDialog)?;
    let object = find_object(&state.working, &active.object_id)?;
    let ObjectKind::Dialog { dialog_tree } = &object.kind else {
        return Err(DispatchError::wrong_kind(
            &active.object_id,
            object.tag(),
            "dialog",
        ));
    };
    let current = dialog_tree
        .find(&active.node_id)
        .ok_or(DispatchError::NoActiveDialog)?;
    let next = current
        .child(node_id)
        .ok_or_else(|| DispatchError::InvalidDialogChoice(node_id.clone()))?;

    let resolved = enter_node(&mut state.resolution, next);
    state.ui.dialog = Some(ActiveDialog {
        object_id: active.object_id,
        node_id: next.id.clone(),
    });

    let applied = Applied::new(InteractionOutcome::DialogAdvanced {
        node: node_id.clone(),
        resolved: resolved.clone(),
    });
    Ok(match resolved {
        Some(_) => applied.write(ProgressWrite::Resolved(
            state.resolution.resolved_flags.clone(),
        )),
        None => applied,
    })
}

/// Set a terminal node's flag. Returns it only when newly set.
fn enter_node(resolution: &mut ResolutionState, node: &DialogNode) -> Option<Flag> {
    if !node.is_terminal() {
        return None;
    }
    let flag = node.resolves_flag.clone()?;
    resolution
        .resolved_flags
        .insert(flag.clone())
        .then_some(flag)
}

pub(super) fn open_panel(state: &mut SessionState, id: &ObjectId) -> Result<Applied, DispatchError> {
    let object = find_object(&state.working, id)?;
    if !matches!(object.kind, ObjectKind::Paper { .. }) {
        return Err(DispatchError::wrong_kind(id, object.tag(), "paper"));
    }
    if !evaluate(object, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }

    state.ui.dialog = None;
    state.ui.panel = Some(id.clone());
    Ok(Applied::new(InteractionOutcome::PanelOpened { object: id.clone() }))
}

/// Set an id'd decorative's own flag so authored before/after pairs swap.
pub(super) fn toggle_decorative(
    state: &mut SessionState,
    id: &ObjectId,
) -> Result<Applied, DispatchError> {
    let object = find_object(&state.working, id)?;
    if !matches!(object.kind, ObjectKind::Decorative) {
        return Err(DispatchError::wrong_kind(id, object.tag(), "decorative"));
    }
    if !evaluate(object, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }

    let flag = object.own_flag().unwrap_or_else(|| Flag::from(id));
    if !state.resolution.resolved_flags.insert(flag.clone()) {
        return Ok(Applied::ignored(IgnoreReason::AlreadyResolved));
    }
    Ok(Applied::new(InteractionOutcome::DecorativeToggled { flag }).write(
        ProgressWrite::Resolved(state.resolution.resolved_flags.clone()),
    ))
}

pub(super) fn close_overlay(state: &mut SessionState) -> Applied {
    if state.ui.close_overlays() {
        Applied::new(InteractionOutcome::OverlayClosed)
    } else {
        Applied::ignored(IgnoreReason::NothingOpen)
    }
}

pub(super) fn toggle_inventory(state: &mut SessionState) -> Applied {
    state.ui.inventory_open = !state.ui.inventory_open;
    Applied::new(InteractionOutcome::InventoryToggled {
        open: state.ui.inventory_open,
    })
}
