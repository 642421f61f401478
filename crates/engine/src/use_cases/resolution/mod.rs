//! Object resolution engine.
//!
//! A pure function from the working scene plus the session's state to the
//! render model. Nothing here mutates state or touches storage.

mod visibility;

pub use visibility::{drop_target, evaluate, stacking_order, Visibility};

use sceneforge_domain::{ObjectKind, ResolutionState, Scene, SceneObject};
use sceneforge_shared::{
    DialogChoice, DialogView, InventoryEntry, ObjectAction, PanelView, RenderModel,
    RenderedObject,
};

use crate::stores::{SessionState, UiState};

/// Render the session's current scene.
pub fn render(state: &SessionState, locale: &str) -> RenderModel {
    resolve_scene(&state.working, &state.resolution, &state.ui, locale)
}

pub fn resolve_scene(
    working: &Scene,
    resolution: &ResolutionState,
    ui: &UiState,
    locale: &str,
) -> RenderModel {
    let objects = stacking_order(working)
        .into_iter()
        .filter_map(|object| {
            let visibility = evaluate(object, resolution);
            visibility
                .visible
                .then(|| rendered(object, visibility.interactive))
        })
        .collect();

    let inventory = resolution
        .inventory
        .usable_items()
        .map(|item| InventoryEntry {
            id: item.id.to_string(),
            visual: item.visual.clone(),
            uses_remaining: item.uses_remaining,
            selected: resolution.selected_item.as_ref() == Some(&item.id),
        })
        .collect();

    RenderModel {
        scene_name: working.name.clone(),
        route: working.route.to_string(),
        background: working.background.clone(),
        objects,
        inventory,
        selected_item: resolution.selected_item.as_ref().map(ToString::to_string),
        dialog: dialog_view(working, ui, locale),
        panel: panel_view(working, ui),
        inventory_open: ui.inventory_open,
    }
}

fn rendered(object: &SceneObject, interactive: bool) -> RenderedObject {
    RenderedObject {
        id: object.id.as_ref().map(ToString::to_string),
        kind: object.tag(),
        group_id: object.group_id.as_ref().map(ToString::to_string),
        position: object.position,
        visual: object.display_visual().clone(),
        sound: object.sound.clone(),
        interactive,
        action: action_for(object),
    }
}

/// Canonical action of an object's kind.
pub fn action_for(object: &SceneObject) -> ObjectAction {
    let group = || {
        object
            .group_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    };
    match &object.kind {
        ObjectKind::Nav { route: Some(route) } if !route.as_str().is_empty() => {
            ObjectAction::Navigate {
                route: route.to_string(),
            }
        }
        ObjectKind::Nav { .. } | ObjectKind::Blank => ObjectAction::None,
        ObjectKind::Collectable { .. } => ObjectAction::Collect,
        ObjectKind::Receiver { .. } => ObjectAction::Receive,
        ObjectKind::Slot { .. } => ObjectAction::ToggleSlot { group_id: group() },
        ObjectKind::Sequence { .. } => ObjectAction::AdvanceSequence { group_id: group() },
        ObjectKind::Dialog { .. } => ObjectAction::OpenDialog,
        ObjectKind::Paper { .. } => ObjectAction::OpenPanel,
        ObjectKind::Decorative if object.id.is_some() => ObjectAction::ToggleDecorative,
        ObjectKind::Decorative => ObjectAction::None,
        ObjectKind::Draggable => ObjectAction::Drag,
    }
}

fn dialog_view(working: &Scene, ui: &UiState, locale: &str) -> Option<DialogView> {
    let active = ui.dialog.as_ref()?;
    let ObjectKind::Dialog { dialog_tree } = &working.object(&active.object_id)?.kind else {
        return None;
    };
    let node = dialog_tree.find(&active.node_id)?;

    let choices = node
        .children
        .iter()
        .map(|child| DialogChoice {
            node_id: child.id.to_string(),
            label: child
                .choice_label
                .as_ref()
                .and_then(|label| label.resolve(locale))
                .or_else(|| child.text.resolve(locale))
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    Some(DialogView {
        object_id: active.object_id.to_string(),
        node_id: node.id.to_string(),
        text: node.text.resolve(locale).unwrap_or_default().to_string(),
        choices,
    })
}

fn panel_view(working: &Scene, ui: &UiState) -> Option<PanelView> {
    let object_id = ui.panel.as_ref()?;
    match &working.object(object_id)?.kind {
        ObjectKind::Paper { content } => Some(PanelView {
            object_id: object_id.to_string(),
            content: content.clone(),
        }),
        _ => None,
    }
}
