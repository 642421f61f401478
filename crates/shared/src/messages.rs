//! Messages exchanged with the renderer, one JSON document per line.
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown player events deserialize to `Unknown` and are ignored

use serde::{Deserialize, Serialize};

use crate::render::RenderModel;

// =============================================================================
// Player Events (Renderer → Engine)
// =============================================================================

/// Raw input reported by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PlayerEvent {
    /// Tap on a scene object.
    TapObject { id: String },
    /// A dragged object (or the held item) was released at a point.
    DragReleaseObject {
        id: String,
        x: f32,
        y: f32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group_id: Option<String>,
    },
    /// A choice in the open dialog was picked.
    ChooseDialog { node_id: String },
    /// Direct navigation, e.g. a back button.
    Navigate { route: String },
    /// Pick an inventory item up (tapping the held item drops it).
    SelectItem { id: String },
    DeselectItem,
    CloseOverlay,
    ToggleInventory,
    ResetRequested,
    #[serde(other)]
    Unknown,
}

// =============================================================================
// Engine Messages (Engine → Renderer)
// =============================================================================

/// Feedback the renderer turns into sound or animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionSignal {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum EngineMessage {
    /// Fresh frame after an event.
    Frame {
        model: Box<RenderModel>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        signal: Option<InteractionSignal>,
        /// False when the last change could not be saved.
        durable: bool,
    },
    /// The event could not be processed. The session keeps running.
    Error { message: String },
}

impl EngineMessage {
    pub fn frame(model: RenderModel, signal: Option<InteractionSignal>, durable: bool) -> Self {
        Self::Frame {
            model: Box::new(model),
            signal,
            durable,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_player_events() {
        let tap: PlayerEvent = serde_json::from_str(r#"{"type":"tapObject","id":"key"}"#).unwrap();
        assert_eq!(tap, PlayerEvent::TapObject { id: "key".into() });

        let drop: PlayerEvent = serde_json::from_str(
            r#"{"type":"dragReleaseObject","id":"key","x":10.5,"y":20,"groupId":"door"}"#,
        )
        .unwrap();
        assert_eq!(
            drop,
            PlayerEvent::DragReleaseObject {
                id: "key".into(),
                x: 10.5,
                y: 20.0,
                group_id: Some("door".into()),
            }
        );

        let reset: PlayerEvent = serde_json::from_str(r#"{"type":"resetRequested"}"#).unwrap();
        assert_eq!(reset, PlayerEvent::ResetRequested);
    }

    #[test]
    fn unknown_events_are_tolerated() {
        let event: PlayerEvent = serde_json::from_str(r#"{"type":"shake"}"#).unwrap();
        assert_eq!(event, PlayerEvent::Unknown);
    }

    #[test]
    fn error_messages_are_tagged() {
        let json = serde_json::to_string(&EngineMessage::error("unknown object 'x'")).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"unknown object 'x'"}"#);
    }
}
