//! Render model - everything a renderer needs to draw one frame.
//!
//! Objects arrive already filtered (only visible ones) and sorted bottom to
//! top. Renderers never evaluate gating rules themselves.

use serde::{Deserialize, Serialize};

use sceneforge_domain::{ObjectKindTag, Position, SoundCue, Visual};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub scene_name: String,
    pub route: String,
    pub background: Visual,
    /// Visible objects in stacking order, lowest first.
    pub objects: Vec<RenderedObject>,
    /// Usable inventory items in collection order.
    pub inventory: Vec<InventoryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog: Option<DialogView>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelView>,
    pub inventory_open: bool,
}

impl RenderModel {
    pub fn object(&self, id: &str) -> Option<&RenderedObject> {
        self.objects
            .iter()
            .find(|o| o.id.as_deref() == Some(id))
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.object(id).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: ObjectKindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub position: Position,
    pub visual: Visual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundCue>,
    pub interactive: bool,
    pub action: ObjectAction,
}

/// What happens when the player interacts with an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ObjectAction {
    None,
    Navigate { route: String },
    Collect,
    Receive,
    ToggleSlot { group_id: String },
    AdvanceSequence { group_id: String },
    OpenDialog,
    OpenPanel,
    ToggleDecorative,
    Drag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub id: String,
    pub visual: Visual,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_remaining: Option<u32>,
    pub selected: bool,
}

/// The dialog node currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogView {
    pub object_id: String,
    pub node_id: String,
    pub text: String,
    /// Empty on a terminal node; closing the overlay ends the dialog.
    pub choices: Vec<DialogChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogChoice {
    pub node_id: String,
    pub label: String,
}

/// Read-only content opened from a paper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub object_id: String,
    pub content: Visual,
}
