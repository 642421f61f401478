//! Scene entity - background plus an ordered list of placed objects.
//!
//! The catalog keeps one immutable template per scene. A session works on a
//! clone of the template with persisted group progress laid over it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{GroupProgress, SceneObject};
use crate::value_objects::Visual;
use crate::{Flag, GroupId, ObjectId, Route};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub name: String,
    pub route: Route,
    #[serde(default)]
    pub background: Visual,
    /// Declaration order breaks stacking ties.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(name: impl Into<String>, route: impl Into<Route>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            background: Visual::default(),
            objects: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Visual) -> Self {
        self.background = background;
        self
    }

    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|o| o.id.as_ref() == Some(id))
    }

    pub fn object_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|o| o.id.as_ref() == Some(id))
    }

    pub fn group_members<'a>(
        &'a self,
        group_id: &'a GroupId,
    ) -> impl Iterator<Item = &'a SceneObject> + 'a {
        self.objects.iter().filter(move |o| o.belongs_to(group_id))
    }

    /// The member carrying the group's answer data.
    pub fn primary_of(&self, group_id: &GroupId) -> Option<&SceneObject> {
        self.objects
            .iter()
            .find(|o| o.belongs_to(group_id) && o.kind.is_primary())
    }

    /// Flag set once the group is solved: the primary's declared flag, or
    /// the group id itself.
    pub fn group_flag(&self, group_id: &GroupId) -> Flag {
        self.primary_of(group_id)
            .and_then(|primary| primary.resolves_flag.clone())
            .unwrap_or_else(|| Flag::from(group_id))
    }

    /// Distinct group ids in declaration order.
    pub fn groups(&self) -> Vec<&GroupId> {
        let mut groups: Vec<&GroupId> = Vec::new();
        for group_id in self.objects.iter().filter_map(|o| o.group_id.as_ref()) {
            if !groups.contains(&group_id) {
                groups.push(group_id);
            }
        }
        groups
    }

    /// Lay persisted slot selections over this copy.
    ///
    /// Selections naming an option a slot does not have are skipped, so stale
    /// saves fall back to the authored selection.
    pub fn apply_group_progress(&mut self, progress: &BTreeMap<GroupId, GroupProgress>) {
        for object in &mut self.objects {
            let (Some(id), Some(group_id)) = (object.id.clone(), object.group_id.clone()) else {
                continue;
            };
            let Some(selection) = progress.get(&group_id).and_then(|p| p.selection(&id)) else {
                continue;
            };
            if object.has_option(selection) {
                object.set_selected_option(selection.clone());
            }
        }
    }
}
