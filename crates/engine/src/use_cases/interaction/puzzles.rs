//! Group puzzles: combination slots and ordered sequences.

use sceneforge_domain::{
    GroupId, GroupProgress, ObjectId, ObjectKind, Scenario, Scene, SceneObject,
};

use super::{find_object, Applied};
use super::{DispatchError, IgnoreReason, InteractionOutcome, MismatchReason};
use crate::entities::ProgressWrite;
use crate::stores::SessionState;
use crate::use_cases::resolution::evaluate;

/// Advance a slot to its next option and check the group's combination.
///
/// Once every slot shows its target option the group flag is set and the
/// group stops reacting.
pub(super) fn toggle_slot(
    state: &mut SessionState,
    group_id: &GroupId,
    slot_id: &ObjectId,
) -> Result<Applied, DispatchError> {
    let slot = member(&state.working, group_id, slot_id)?;
    let ObjectKind::Slot {
        selected_option_id, ..
    } = &slot.kind
    else {
        return Err(DispatchError::wrong_kind(slot_id, slot.tag(), "slot"));
    };
    if !evaluate(slot, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }
    let flag = state.working.group_flag(group_id);
    if state.resolution.resolved_flags.contains(&flag) {
        return Ok(Applied::ignored(IgnoreReason::GroupSolved));
    }
    let Some(next) = slot.next_option_after(selected_option_id) else {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    };

    if let Some(object) = state.working.object_mut(slot_id) {
        object.set_selected_option(next.clone());
    }
    let progress = state
        .resolution
        .group_progress
        .entry(group_id.clone())
        .or_insert_with(GroupProgress::empty_slots);
    if !matches!(progress, GroupProgress::Slots { .. }) {
        *progress = GroupProgress::empty_slots();
    }
    if let GroupProgress::Slots { selections } = progress {
        selections.insert(slot_id.clone(), next);
    }
    let record = progress.clone();

    let solved = combination_matches(&state.working, group_id);
    let mut applied = Applied::new(InteractionOutcome::SlotAdvanced {
        group: group_id.clone(),
        solved,
    })
    .write(ProgressWrite::Group(group_id.clone(), Some(record)));

    if solved {
        state.resolution.resolved_flags.insert(flag);
        applied = applied.write(ProgressWrite::Resolved(
            state.resolution.resolved_flags.clone(),
        ));
    }
    Ok(applied)
}

/// Append a tap to the group's sequence buffer.
///
/// A tap that breaks the expected order empties the buffer. Completing the
/// order sets the group flag and empties the buffer.
pub(super) fn advance_sequence(
    state: &mut SessionState,
    group_id: &GroupId,
    object_id: &ObjectId,
) -> Result<Applied, DispatchError> {
    let object = member(&state.working, group_id, object_id)?;
    if !matches!(object.kind, ObjectKind::Sequence { .. }) {
        return Err(DispatchError::wrong_kind(object_id, object.tag(), "sequence"));
    }
    if !evaluate(object, &state.resolution).interactive {
        return Ok(Applied::ignored(IgnoreReason::NotInteractive));
    }
    let flag = state.working.group_flag(group_id);
    if state.resolution.resolved_flags.contains(&flag) {
        return Ok(Applied::ignored(IgnoreReason::GroupSolved));
    }

    let expected: Vec<ObjectId> = state
        .working
        .primary_of(group_id)
        .and_then(|primary| primary.kind.scenario())
        .and_then(Scenario::as_ordered)
        .map(<[ObjectId]>::to_vec)
        .unwrap_or_default();
    let mut buffer = state
        .resolution
        .group_progress
        .get(group_id)
        .map(|progress| progress.sequence_buffer().to_vec())
        .unwrap_or_default();
    buffer.push(object_id.clone());

    let (outcome, buffer) = if !expected.starts_with(&buffer) {
        (InteractionOutcome::Mismatch(MismatchReason::WrongSequence), Vec::new())
    } else if buffer.len() == expected.len() {
        state.resolution.resolved_flags.insert(flag.clone());
        (
            InteractionOutcome::SequenceSolved {
                group: group_id.clone(),
                flag,
            },
            Vec::new(),
        )
    } else {
        (
            InteractionOutcome::SequenceAdvanced {
                group: group_id.clone(),
                step: buffer.len(),
            },
            buffer,
        )
    };

    let record = GroupProgress::Sequence { buffer };
    state
        .resolution
        .group_progress
        .insert(group_id.clone(), record.clone());

    let solved = matches!(outcome, InteractionOutcome::SequenceSolved { .. });
    let mut applied =
        Applied::new(outcome).write(ProgressWrite::Group(group_id.clone(), Some(record)));
    if solved {
        applied = applied.write(ProgressWrite::Resolved(
            state.resolution.resolved_flags.clone(),
        ));
    }
    Ok(applied)
}

fn member<'a>(
    scene: &'a Scene,
    group_id: &GroupId,
    id: &ObjectId,
) -> Result<&'a SceneObject, DispatchError> {
    let object = find_object(scene, id)?;
    if !object.belongs_to(group_id) {
        return Err(DispatchError::WrongGroup {
            id: id.clone(),
            group: group_id.to_string(),
        });
    }
    Ok(object)
}

/// Every slot of the group shows the option the primary's scenario names.
fn combination_matches(scene: &Scene, group_id: &GroupId) -> bool {
    let Some(targets) = scene
        .primary_of(group_id)
        .and_then(|primary| primary.kind.scenario())
        .and_then(Scenario::as_keyed)
    else {
        return false;
    };

    scene
        .group_members(group_id)
        .all(|object| match (&object.id, &object.kind) {
            (
                Some(id),
                ObjectKind::Slot {
                    selected_option_id, ..
                },
            ) => targets.get(id) == Some(selected_option_id),
            _ => false,
        })
}
