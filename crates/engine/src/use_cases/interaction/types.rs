//! Interaction outcome types.

use sceneforge_domain::{DialogNodeId, Flag, GroupId, ObjectId, Route};
use sceneforge_shared::InteractionSignal;

/// Why an interaction was refused as a puzzle failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// Receive attempted with empty hands.
    NoItemHeld,
    /// The held item is in the inventory but has no uses left.
    ItemUsedUp,
    /// The held item was never collected.
    NotInInventory,
    /// The receiver does not accept the item.
    UnexpectedItem,
    /// Drag released outside every active receiver.
    MissedTarget,
    /// Sequence tap out of order; the buffer was reset.
    WrongSequence,
}

/// Why an interaction had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotInteractive,
    /// The group is solved and frozen.
    GroupSolved,
    /// Nav hotspot without a route.
    InertNav,
    /// Collectable with zero uses.
    Exhausted,
    /// Flag already set.
    AlreadyResolved,
    NothingOpen,
    NothingSelected,
}

/// What a single turn did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    Navigated { route: Route },
    Collected { item: ObjectId, resolved: Option<Flag> },
    Received { receiver: ObjectId, item: ObjectId, flag: Flag },
    SlotAdvanced { group: GroupId, solved: bool },
    SequenceAdvanced { group: GroupId, step: usize },
    SequenceSolved { group: GroupId, flag: Flag },
    DialogOpened { object: ObjectId },
    DialogAdvanced { node: DialogNodeId, resolved: Option<Flag> },
    PanelOpened { object: ObjectId },
    DecorativeToggled { flag: Flag },
    ItemSelected { item: ObjectId },
    ItemDeselected,
    OverlayClosed,
    InventoryToggled { open: bool },
    Reset,
    Mismatch(MismatchReason),
    Ignored(IgnoreReason),
}

impl InteractionOutcome {
    /// Feedback the renderer plays for this outcome, if any.
    pub fn signal(&self) -> Option<InteractionSignal> {
        match self {
            Self::Collected { .. }
            | Self::Received { .. }
            | Self::SequenceSolved { .. }
            | Self::SlotAdvanced { solved: true, .. }
            | Self::DialogAdvanced {
                resolved: Some(_), ..
            } => Some(InteractionSignal::Success),
            Self::Mismatch(_) => Some(InteractionSignal::Failure),
            _ => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch(_))
    }
}

/// Result of one dispatched operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub outcome: InteractionOutcome,
    /// False when at least one write failed; memory still holds the new state.
    pub durable: bool,
}
