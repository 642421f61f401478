//! Opaque renderable descriptors.
//!
//! The resolution engine forwards these to the rendering collaborator without
//! looking inside them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Language used when a translation for the requested locale is missing.
pub const FALLBACK_LOCALE: &str = "en";

/// Text keyed by locale, e.g. `{ "en": "Hello" }`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<String, String>);

impl LocalizedText {
    pub fn new(locale: impl Into<String>, text: impl Into<String>) -> Self {
        let mut translations = BTreeMap::new();
        translations.insert(locale.into(), text.into());
        Self(translations)
    }

    pub fn with(mut self, locale: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(locale.into(), text.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pick the best translation: exact locale, then English, then anything.
    pub fn resolve(&self, locale: &str) -> Option<&str> {
        self.0
            .get(locale)
            .or_else(|| self.0.get(FALLBACK_LOCALE))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }
}

/// What the renderer should draw for an object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Visual {
    /// Invisible hotspot.
    #[default]
    Trigger,
    Image {
        src: String,
    },
    Animation {
        src: String,
        #[serde(default)]
        looped: bool,
    },
    Text {
        text: LocalizedText,
    },
}

impl Visual {
    pub fn image(src: impl Into<String>) -> Self {
        Self::Image { src: src.into() }
    }
}

/// When a sound cue fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundTrigger {
    #[default]
    OnInteract,
    OnResolved,
}

/// Audio cue forwarded to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundCue {
    pub src: String,
    #[serde(default)]
    pub trigger: SoundTrigger,
}
