//! Inventory operations: pick up, hand over, drag and hold.

use sceneforge_domain::{
    Flag, GroupId, Inventory, InventoryItem, ObjectId, ObjectKind, ResolutionState,
};

use super::{find_object, Applied};
use super::{DispatchError, IgnoreReason, InteractionOutcome, MismatchReason};
use crate::entities::ProgressWrite;
use crate::stores::SessionState;
use crate::use_cases::resolution::{drop_target, evaluate};

pub(super) fn collect(state: &mut SessionState, id: &ObjectId) -> Result<Applied, DispatchError> {
    let object = find_object(&state.working, id)?;
    let ObjectKind::Collectable {
        uses_remaining,
        inventory_visual,
    } = &object.kind
    else {
        return Err(DispatchError::wrong_kind(id, object.tag(), "collectable"));
    };
    if !evaluate(object, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }
    if *uses_remaining == Some(0) {
        return Ok(Applied::ignored(IgnoreReason::Exhausted));
    }

    let visual = inventory_visual
        .clone()
        .unwrap_or_else(|| object.visual.clone());
    let item = InventoryItem::new(id.clone(), visual, *uses_remaining);
    let resolves = object.resolves_flag.clone();

    let resolution = &mut state.resolution;
    resolution.inventory.push(item);
    let mut applied = Applied::new(InteractionOutcome::Collected {
        item: id.clone(),
        resolved: resolves.clone(),
    })
    .write(ProgressWrite::Inventory(resolution.inventory.clone()));

    if let Some(flag) = resolves {
        if resolution.resolved_flags.insert(flag) {
            applied = applied.write(ProgressWrite::Resolved(resolution.resolved_flags.clone()));
        }
    }
    Ok(applied)
}

pub(super) fn receive(
    state: &mut SessionState,
    receiver_id: &ObjectId,
    held: Option<&ObjectId>,
) -> Result<Applied, DispatchError> {
    let receiver = find_object(&state.working, receiver_id)?;
    let ObjectKind::Receiver { expected_value } = &receiver.kind else {
        return Err(DispatchError::wrong_kind(receiver_id, receiver.tag(), "receiver"));
    };
    if !evaluate(receiver, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }
    let flag = receiver
        .own_flag()
        .unwrap_or_else(|| Flag::from(receiver_id));
    if state.resolution.resolved_flags.contains(&flag) {
        return Ok(Applied::ignored(IgnoreReason::AlreadyResolved));
    }
    let Some(item) = held else {
        return Ok(Applied::mismatch(MismatchReason::NoItemHeld));
    };
    if let Some(reason) = check_held(&state.resolution.inventory, item) {
        return Ok(Applied::mismatch(reason));
    }
    if !expected_value.contains(item) {
        return Ok(Applied::mismatch(MismatchReason::UnexpectedItem));
    }

    Ok(hand_over(&mut state.resolution, receiver_id, item, flag))
}

/// Where a dragged object comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragSource {
    Scene,
    Inventory,
}

/// Release a dragged object at `(x, y)`.
///
/// The dragged id is either a draggable placed in the scene or an inventory
/// item. The target is the topmost active receiver under the point,
/// optionally restricted to `group_id`.
pub(super) fn drop_draggable(
    state: &mut SessionState,
    dragged: &ObjectId,
    group_id: Option<&GroupId>,
    x: f32,
    y: f32,
) -> Result<Applied, DispatchError> {
    let in_inventory = state.resolution.inventory.contains(dragged);
    let source = match state.working.object(dragged) {
        Some(object) if matches!(object.kind, ObjectKind::Draggable) => {
            if !evaluate(object, &state.resolution).interactive {
                return Ok(Applied::ignored(IgnoreReason::NotInteractive));
            }
            DragSource::Scene
        }
        _ if in_inventory => DragSource::Inventory,
        Some(object) => {
            return Err(DispatchError::wrong_kind(dragged, object.tag(), "draggable"));
        }
        None => return Err(DispatchError::UnknownObject(dragged.clone())),
    };
    if source == DragSource::Inventory {
        if let Some(reason) = check_held(&state.resolution.inventory, dragged) {
            return Ok(Applied::mismatch(reason));
        }
    }

    let Some(target) = drop_target(&state.working, &state.resolution, x, y, group_id) else {
        return Ok(Applied::mismatch(MismatchReason::MissedTarget));
    };
    let (Some(receiver_id), ObjectKind::Receiver { expected_value }) = (&target.id, &target.kind)
    else {
        return Ok(Applied::mismatch(MismatchReason::MissedTarget));
    };
    let flag = target
        .own_flag()
        .unwrap_or_else(|| Flag::from(receiver_id));
    if state.resolution.resolved_flags.contains(&flag) {
        return Ok(Applied::ignored(IgnoreReason::AlreadyResolved));
    }
    if !expected_value.contains(dragged) {
        return Ok(Applied::mismatch(MismatchReason::UnexpectedItem));
    }

    let receiver_id = receiver_id.clone();

    match source {
        DragSource::Inventory => Ok(hand_over(&mut state.resolution, &receiver_id, dragged, flag)),
        DragSource::Scene => {
            let resolution = &mut state.resolution;
            resolution.resolved_flags.insert(flag.clone());
            Ok(Applied::new(InteractionOutcome::Received {
                receiver: receiver_id,
                item: dragged.clone(),
                flag,
            })
            .write(ProgressWrite::Resolved(resolution.resolved_flags.clone())))
        }
    }
}

/// Pick an item up, or put it down when it is already held.
pub(super) fn select_item(
    state: &mut SessionState,
    item: &ObjectId,
) -> Result<Applied, DispatchError> {
    let resolution = &mut state.resolution;
    if resolution.inventory.usable(item).is_none() {
        return Err(DispatchError::ItemNotInInventory(item.clone()));
    }

    if resolution.selected_item.as_ref() == Some(item) {
        resolution.selected_item = None;
        return Ok(Applied::new(InteractionOutcome::ItemDeselected)
            .write(ProgressWrite::SelectedItem(None)));
    }

    resolution.selected_item = Some(item.clone());
    Ok(
        Applied::new(InteractionOutcome::ItemSelected { item: item.clone() })
            .write(ProgressWrite::SelectedItem(Some(item.clone()))),
    )
}

pub(super) fn deselect_item(state: &mut SessionState) -> Applied {
    if state.resolution.selected_item.take().is_none() {
        return Applied::ignored(IgnoreReason::NothingSelected);
    }
    Applied::new(InteractionOutcome::ItemDeselected).write(ProgressWrite::SelectedItem(None))
}

fn check_held(inventory: &Inventory, item: &ObjectId) -> Option<MismatchReason> {
    if inventory.usable(item).is_some() {
        None
    } else if inventory.contains(item) {
        Some(MismatchReason::ItemUsedUp)
    } else {
        Some(MismatchReason::NotInInventory)
    }
}

/// Successful delivery of an inventory item: spend a use, set the receiver's
/// flag and empty the player's hands.
fn hand_over(
    resolution: &mut ResolutionState,
    receiver: &ObjectId,
    item: &ObjectId,
    flag: Flag,
) -> Applied {
    if let Some(entry) = resolution.inventory.usable_mut(item) {
        entry.consume_use();
    }
    resolution.resolved_flags.insert(flag.clone());

    let mut applied = Applied::new(InteractionOutcome::Received {
        receiver: receiver.clone(),
        item: item.clone(),
        flag,
    })
    .write(ProgressWrite::Inventory(resolution.inventory.clone()))
    .write(ProgressWrite::Resolved(resolution.resolved_flags.clone()));

    if resolution.selected_item.take().is_some() {
        applied = applied.write(ProgressWrite::SelectedItem(None));
    }
    applied
}
