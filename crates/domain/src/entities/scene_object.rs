//! Scene object entity - one interactive or decorative unit placed in a scene.
//!
//! Each object has a kind carrying only the data that kind needs, plus the
//! fields shared by every kind (placement, visual, gating rules).
//!
//! ## Authored form
//!
//! ```json
//! {
//!   "kind": "receiver",
//!   "id": "safe-door",
//!   "expectedValue": ["safe-green-key"],
//!   "position": { "x": 55, "y": 50, "width": 40, "height": 55, "zIndex": 3 },
//!   "visual": { "type": "image", "src": "safe-door.png" },
//!   "logical": { "hideOnResolvedFlags": ["safe-door"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entities::DialogNode;
use crate::value_objects::{GatingRules, Position, SoundCue, Visual};
use crate::{Flag, GroupId, ObjectId, OptionId, Route};

/// One selectable state of a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotOption {
    pub id: OptionId,
    #[serde(default)]
    pub visual: Visual,
}

impl SlotOption {
    pub fn new(id: impl Into<OptionId>, visual: Visual) -> Self {
        Self {
            id: id.into(),
            visual,
        }
    }
}

/// Answer data carried by the primary member of a puzzle group.
///
/// Slot groups use the keyed form (member id -> correct option); sequence
/// groups use the ordered form (member ids in tap order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scenario {
    Ordered(Vec<ObjectId>),
    Keyed(BTreeMap<ObjectId, OptionId>),
}

impl Scenario {
    pub fn as_ordered(&self) -> Option<&[ObjectId]> {
        match self {
            Self::Ordered(ids) => Some(ids),
            Self::Keyed(_) => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&BTreeMap<ObjectId, OptionId>> {
        match self {
            Self::Keyed(map) => Some(map),
            Self::Ordered(_) => None,
        }
    }

    /// Every member id the scenario mentions.
    pub fn member_ids(&self) -> Vec<&ObjectId> {
        match self {
            Self::Ordered(ids) => ids.iter().collect(),
            Self::Keyed(map) => map.keys().collect(),
        }
    }
}

/// Kind-specific data of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ObjectKind {
    /// Pure decoration, never interactive.
    Blank,
    /// Hotspot leading to another scene. An absent or empty route is inert.
    Nav {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        route: Option<Route>,
    },
    /// Item the player can pick up.
    Collectable {
        /// Absent means unlimited uses.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        uses_remaining: Option<u32>,
        /// How the item looks in the inventory, if different from the scene.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inventory_visual: Option<Visual>,
    },
    /// Target accepting one of the expected items.
    Receiver {
        #[serde(default)]
        expected_value: Vec<ObjectId>,
    },
    /// One member of a combination puzzle, cycling through its options.
    Slot {
        options_list: Vec<SlotOption>,
        selected_option_id: OptionId,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        primary: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scenario: Option<Scenario>,
    },
    /// One member of an ordered tap puzzle.
    Sequence {
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        primary: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        scenario: Option<Scenario>,
    },
    /// Cosmetic object; an id'd decorative toggles its own flag when tapped.
    Decorative,
    /// Character opening a dialog tree.
    Dialog { dialog_tree: DialogNode },
    /// Read-only note opening a content panel.
    Paper { content: Visual },
    /// Object the player drags onto a receiver.
    Draggable,
}

/// Plain kind tag, used in render models and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectKindTag {
    Blank,
    Nav,
    Collectable,
    Receiver,
    Slot,
    Sequence,
    Decorative,
    Dialog,
    Paper,
    Draggable,
}

impl fmt::Display for ObjectKindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Blank => "blank",
            Self::Nav => "nav",
            Self::Collectable => "collectable",
            Self::Receiver => "receiver",
            Self::Slot => "slot",
            Self::Sequence => "sequence",
            Self::Decorative => "decorative",
            Self::Dialog => "dialog",
            Self::Paper => "paper",
            Self::Draggable => "draggable",
        };
        f.write_str(name)
    }
}

impl ObjectKind {
    pub fn tag(&self) -> ObjectKindTag {
        match self {
            Self::Blank => ObjectKindTag::Blank,
            Self::Nav { .. } => ObjectKindTag::Nav,
            Self::Collectable { .. } => ObjectKindTag::Collectable,
            Self::Receiver { .. } => ObjectKindTag::Receiver,
            Self::Slot { .. } => ObjectKindTag::Slot,
            Self::Sequence { .. } => ObjectKindTag::Sequence,
            Self::Decorative => ObjectKindTag::Decorative,
            Self::Dialog { .. } => ObjectKindTag::Dialog,
            Self::Paper { .. } => ObjectKindTag::Paper,
            Self::Draggable => ObjectKindTag::Draggable,
        }
    }

    /// Kinds that take part in puzzle logic and must carry an id.
    pub fn requires_id(&self) -> bool {
        matches!(
            self,
            Self::Collectable { .. }
                | Self::Receiver { .. }
                | Self::Slot { .. }
                | Self::Sequence { .. }
                | Self::Draggable
                | Self::Dialog { .. }
        )
    }

    /// Kinds that must belong to a group.
    pub fn requires_group(&self) -> bool {
        matches!(self, Self::Slot { .. } | Self::Sequence { .. })
    }

    pub fn is_primary(&self) -> bool {
        match self {
            Self::Slot { primary, .. } | Self::Sequence { primary, .. } => *primary,
            _ => false,
        }
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        match self {
            Self::Slot { scenario, .. } | Self::Sequence { scenario, .. } => scenario.as_ref(),
            _ => None,
        }
    }
}

/// An object placed in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(flatten)]
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub visual: Visual,
    #[serde(default, rename = "logical")]
    pub rules: GatingRules,
    /// Flag set when an interaction with this object succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolves_flag: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundCue>,
}

impl SceneObject {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            id: None,
            kind,
            group_id: None,
            position: Position::default(),
            visual: Visual::default(),
            rules: GatingRules::default(),
            resolves_flag: None,
            sound: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ObjectId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn in_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_rules(mut self, rules: GatingRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn resolving(mut self, flag: impl Into<Flag>) -> Self {
        self.resolves_flag = Some(flag.into());
        self
    }

    pub fn with_sound(mut self, sound: SoundCue) -> Self {
        self.sound = Some(sound);
        self
    }

    pub fn tag(&self) -> ObjectKindTag {
        self.kind.tag()
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_ref().is_some_and(|own| own.as_str() == id)
    }

    pub fn belongs_to(&self, group_id: &GroupId) -> bool {
        self.group_id.as_ref() == Some(group_id)
    }

    /// Flag a receiver (or id'd decorative) sets on success.
    pub fn own_flag(&self) -> Option<Flag> {
        self.resolves_flag
            .clone()
            .or_else(|| self.id.as_ref().map(Flag::from))
    }

    /// Currently selected option of a slot.
    pub fn selected_option(&self) -> Option<&SlotOption> {
        match &self.kind {
            ObjectKind::Slot {
                options_list,
                selected_option_id,
                ..
            } => options_list.iter().find(|o| &o.id == selected_option_id),
            _ => None,
        }
    }

    pub fn has_option(&self, option: &OptionId) -> bool {
        match &self.kind {
            ObjectKind::Slot { options_list, .. } => options_list.iter().any(|o| &o.id == option),
            _ => false,
        }
    }

    /// Option following `current`, wrapping to the first one.
    ///
    /// An unknown current option restarts the cycle at the first option.
    pub fn next_option_after(&self, current: &OptionId) -> Option<OptionId> {
        let ObjectKind::Slot { options_list, .. } = &self.kind else {
            return None;
        };
        let next = match options_list.iter().position(|o| &o.id == current) {
            Some(index) => options_list.get((index + 1) % options_list.len()),
            None => options_list.first(),
        };
        next.map(|o| o.id.clone())
    }

    /// Overwrite a slot's selection. No-op for other kinds.
    pub fn set_selected_option(&mut self, option: OptionId) {
        if let ObjectKind::Slot {
            selected_option_id, ..
        } = &mut self.kind
        {
            *selected_option_id = option;
        }
    }

    /// What the renderer draws: a slot shows its selected option.
    pub fn display_visual(&self) -> &Visual {
        self.selected_option()
            .map(|o| &o.visual)
            .unwrap_or(&self.visual)
    }
}
