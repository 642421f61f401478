//! Gating rules - flag conditions controlling visibility and interactivity.
//!
//! Showing uses OR semantics and hiding uses AND semantics: an object appears
//! as soon as any unlocking flag is resolved, and disappears only once every
//! hiding flag is resolved. Activation is AND over its list.

use serde::{Deserialize, Serialize};

use crate::entities::ResolvedFlags;
use crate::Flag;

/// The `logical` block of a scene object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GatingRules {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub show_on_resolved_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hide_on_resolved_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deactivate_on_resolved_flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activate_on_resolved_flags: Vec<Flag>,
}

impl GatingRules {
    pub fn shown_when(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.show_on_resolved_flags = flags.into_iter().collect();
        self
    }

    pub fn hidden_when(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.hide_on_resolved_flags = flags.into_iter().collect();
        self
    }

    pub fn deactivated_when(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.deactivate_on_resolved_flags = flags.into_iter().collect();
        self
    }

    pub fn activated_when(mut self, flags: impl IntoIterator<Item = Flag>) -> Self {
        self.activate_on_resolved_flags = flags.into_iter().collect();
        self
    }

    /// True when no show list exists or any flag in it is resolved.
    pub fn is_shown(&self, flags: &ResolvedFlags) -> bool {
        self.show_on_resolved_flags.is_empty() || flags.any_of(&self.show_on_resolved_flags)
    }

    /// True when a hide list exists and every flag in it is resolved.
    pub fn is_hidden(&self, flags: &ResolvedFlags) -> bool {
        !self.hide_on_resolved_flags.is_empty() && flags.all_of(&self.hide_on_resolved_flags)
    }

    pub fn is_deactivated(&self, flags: &ResolvedFlags) -> bool {
        !self.deactivate_on_resolved_flags.is_empty()
            && flags.all_of(&self.deactivate_on_resolved_flags)
    }

    pub fn is_activated(&self, flags: &ResolvedFlags) -> bool {
        flags.all_of(&self.activate_on_resolved_flags)
    }
}
