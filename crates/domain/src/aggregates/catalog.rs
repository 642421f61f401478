//! Scene catalog aggregate - every scene of the game, validated once at load.
//!
//! # Invariants
//!
//! - Routes are unique and the initial route names a scene
//! - Object ids are unique within a scene
//! - Every slot or sequence group has exactly one primary with a scenario of
//!   the right shape, naming only members of the group
//! - Receivers only expect collectable or draggable ids
//! - Nav routes point at existing scenes
//! - Group ids never collide with the reserved storage keys
//!
//! The catalog is never mutated after construction. Sessions clone scenes out
//! of it as working copies.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::entities::{ObjectKind, ObjectKindTag, Scenario, Scene, SceneObject};
use crate::error::{CatalogError, CatalogIssue};
use crate::{GroupId, ObjectId, Route};

/// Storage keys the session uses for its own records. Group progress is
/// stored under the group id, so groups may not take these names.
pub const RESERVED_GROUP_IDS: [&str; 3] = ["inventory", "resolved", "selectedItem"];

/// Authored catalog file, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub initial_route: Route,
    pub scenes: Vec<Scene>,
}

/// A validated set of scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCatalog {
    initial_route: Route,
    scenes: Vec<Scene>,
}

impl SceneCatalog {
    /// Validate and build a catalog. Every issue found is reported at once.
    pub fn new(initial_route: Route, scenes: Vec<Scene>) -> Result<Self, CatalogError> {
        let issues = validate(&initial_route, &scenes);
        if !issues.is_empty() {
            return Err(CatalogError::new(issues));
        }
        Ok(Self {
            initial_route,
            scenes,
        })
    }

    pub fn initial_route(&self) -> &Route {
        &self.initial_route
    }

    /// Start somewhere other than the authored initial route.
    pub fn with_initial_route(mut self, route: Route) -> Result<Self, CatalogError> {
        if self.scene(&route).is_none() {
            return Err(CatalogError::new(vec![CatalogIssue::MissingInitialRoute {
                route: route.into_inner(),
            }]));
        }
        self.initial_route = route;
        Ok(self)
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn scene(&self, route: &Route) -> Option<&Scene> {
        self.scenes.iter().find(|s| &s.route == route)
    }

    /// Every group id across all scenes, for clearing stored progress.
    pub fn group_ids(&self) -> BTreeSet<&GroupId> {
        self.scenes
            .iter()
            .flat_map(|s| s.objects.iter().filter_map(|o| o.group_id.as_ref()))
            .collect()
    }
}

impl TryFrom<CatalogDocument> for SceneCatalog {
    type Error = CatalogError;

    fn try_from(document: CatalogDocument) -> Result<Self, Self::Error> {
        Self::new(document.initial_route, document.scenes)
    }
}

fn validate(initial_route: &Route, scenes: &[Scene]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let mut routes = HashSet::new();
    for scene in scenes {
        if !routes.insert(&scene.route) {
            issues.push(CatalogIssue::DuplicateRoute {
                route: scene.route.to_string(),
            });
        }
    }
    if !routes.contains(initial_route) {
        issues.push(CatalogIssue::MissingInitialRoute {
            route: initial_route.to_string(),
        });
    }

    let item_ids: HashSet<&ObjectId> = scenes
        .iter()
        .flat_map(|s| &s.objects)
        .filter(|o| matches!(o.tag(), ObjectKindTag::Collectable | ObjectKindTag::Draggable))
        .filter_map(|o| o.id.as_ref())
        .collect();

    let mut group_homes: BTreeMap<&GroupId, &Route> = BTreeMap::new();

    for scene in scenes {
        let name = scene.route.to_string();
        check_objects(scene, &name, &routes, &item_ids, &mut issues);

        for group_id in scene.groups() {
            match group_homes.get(group_id) {
                Some(first) if *first != &scene.route => {
                    issues.push(CatalogIssue::GroupInSeveralScenes {
                        group: group_id.to_string(),
                        first: first.to_string(),
                        second: name.clone(),
                    })
                }
                Some(_) => {}
                None => {
                    group_homes.insert(group_id, &scene.route);
                }
            }
            check_group(scene, &name, group_id, &mut issues);
        }
    }

    issues
}

fn check_objects(
    scene: &Scene,
    name: &str,
    routes: &HashSet<&Route>,
    item_ids: &HashSet<&ObjectId>,
    issues: &mut Vec<CatalogIssue>,
) {
    let mut seen = HashSet::new();

    for (index, object) in scene.objects.iter().enumerate() {
        let Some(id) = object.id.as_ref() else {
            if object.kind.requires_id() {
                issues.push(CatalogIssue::MissingObjectId {
                    scene: name.to_string(),
                    index,
                    kind: object.tag().to_string(),
                });
            }
            continue;
        };
        if !seen.insert(id) {
            issues.push(CatalogIssue::DuplicateObjectId {
                scene: name.to_string(),
                id: id.to_string(),
            });
        }
        if object.kind.requires_group() && object.group_id.is_none() {
            issues.push(CatalogIssue::MissingGroupId {
                scene: name.to_string(),
                id: id.to_string(),
                kind: object.tag().to_string(),
            });
        }

        match &object.kind {
            ObjectKind::Receiver { expected_value } => {
                for item in expected_value.iter().filter(|item| !item_ids.contains(item)) {
                    issues.push(CatalogIssue::UnknownExpectedValue {
                        scene: name.to_string(),
                        receiver: id.to_string(),
                        item: item.to_string(),
                    });
                }
            }
            ObjectKind::Slot {
                options_list,
                selected_option_id,
                ..
            } => {
                if options_list.is_empty() {
                    issues.push(CatalogIssue::EmptySlotOptions {
                        scene: name.to_string(),
                        id: id.to_string(),
                    });
                } else if !object.has_option(selected_option_id) {
                    issues.push(CatalogIssue::InvalidSlotSelection {
                        scene: name.to_string(),
                        id: id.to_string(),
                        option: selected_option_id.to_string(),
                    });
                }
            }
            ObjectKind::Dialog { dialog_tree } => {
                let mut nodes = HashSet::new();
                for node in dialog_tree.node_ids() {
                    if !nodes.insert(node) {
                        issues.push(CatalogIssue::DuplicateDialogNode {
                            scene: name.to_string(),
                            object: id.to_string(),
                            node: node.to_string(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    // Nav hotspots are often anonymous, so routes are checked separately.
    for object in &scene.objects {
        if let ObjectKind::Nav { route: Some(route) } = &object.kind {
            if !route.as_str().is_empty() && !routes.contains(route) {
                issues.push(CatalogIssue::DanglingRoute {
                    scene: name.to_string(),
                    route: route.to_string(),
                });
            }
        }
    }
}

fn check_group(scene: &Scene, name: &str, group_id: &GroupId, issues: &mut Vec<CatalogIssue>) {
    let group = group_id.to_string();

    if RESERVED_GROUP_IDS.contains(&group_id.as_str()) {
        issues.push(CatalogIssue::ReservedGroupId {
            scene: name.to_string(),
            group: group.clone(),
        });
    }

    let members: Vec<&SceneObject> = scene.group_members(group_id).collect();
    let slots = members.iter().filter(|o| o.tag() == ObjectKindTag::Slot).count();
    let sequences = members
        .iter()
        .filter(|o| o.tag() == ObjectKindTag::Sequence)
        .count();

    // Groups of receivers or draggables only scope drops; they have no answer.
    if slots == 0 && sequences == 0 {
        return;
    }
    if slots > 0 && sequences > 0 {
        issues.push(CatalogIssue::MixedGroupKinds {
            scene: name.to_string(),
            group,
        });
        return;
    }

    let primaries: Vec<&&SceneObject> = members.iter().filter(|o| o.kind.is_primary()).collect();
    let [primary] = primaries.as_slice() else {
        issues.push(CatalogIssue::PrimaryCount {
            scene: name.to_string(),
            group,
            count: primaries.len(),
        });
        return;
    };

    let is_member = |id: &ObjectId| members.iter().any(|o| o.id.as_ref() == Some(id));

    match (primary.tag(), primary.kind.scenario()) {
        (ObjectKindTag::Slot, Some(Scenario::Keyed(targets))) => {
            for (member, option) in targets {
                match scene.object(member).filter(|_| is_member(member)) {
                    None => issues.push(CatalogIssue::UnknownScenarioMember {
                        scene: name.to_string(),
                        group: group.clone(),
                        member: member.to_string(),
                    }),
                    Some(slot) if !slot.has_option(option) => {
                        issues.push(CatalogIssue::UnknownScenarioOption {
                            scene: name.to_string(),
                            group: group.clone(),
                            slot: member.to_string(),
                            option: option.to_string(),
                        })
                    }
                    Some(_) => {}
                }
            }
            for slot_id in members.iter().filter_map(|o| o.id.as_ref()) {
                if !targets.contains_key(slot_id) {
                    issues.push(CatalogIssue::SlotWithoutTarget {
                        scene: name.to_string(),
                        group: group.clone(),
                        slot: slot_id.to_string(),
                    });
                }
            }
        }
        (ObjectKindTag::Sequence, Some(Scenario::Ordered(order))) if !order.is_empty() => {
            for member in order.iter().filter(|m| !is_member(m)) {
                issues.push(CatalogIssue::UnknownScenarioMember {
                    scene: name.to_string(),
                    group: group.clone(),
                    member: member.to_string(),
                });
            }
        }
        (tag, _) => issues.push(CatalogIssue::ScenarioShape {
            scene: name.to_string(),
            group,
            expected: if tag == ObjectKindTag::Slot {
                "a keyed"
            } else {
                "a non-empty ordered"
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DialogNode, SlotOption};
    use crate::value_objects::{LocalizedText, Visual};
    use crate::OptionId;

    fn nav(route: &str) -> SceneObject {
        SceneObject::new(ObjectKind::Nav {
            route: Some(Route::from(route)),
        })
    }

    fn slot(id: &str, group: &str, scenario: Option<Scenario>) -> SceneObject {
        SceneObject::new(ObjectKind::Slot {
            options_list: vec![
                SlotOption::new(1, Visual::Trigger),
                SlotOption::new(2, Visual::Trigger),
            ],
            selected_option_id: OptionId::from(1),
            primary: scenario.is_some(),
            scenario,
        })
        .with_id(id)
        .in_group(group)
    }

    fn keyed(pairs: &[(&str, u32)]) -> Scenario {
        Scenario::Keyed(
            pairs
                .iter()
                .map(|(id, option)| (ObjectId::from(*id), OptionId::from(*option)))
                .collect(),
        )
    }

    fn issues(initial: &str, scenes: Vec<Scene>) -> Vec<CatalogIssue> {
        match SceneCatalog::new(Route::from(initial), scenes) {
            Ok(_) => Vec::new(),
            Err(err) => err.issues,
        }
    }

    #[test]
    fn accepts_a_well_formed_catalog() {
        let room = Scene::new("Room", "room")
            .with_object(
                SceneObject::new(ObjectKind::Collectable {
                    uses_remaining: Some(1),
                    inventory_visual: None,
                })
                .with_id("key"),
            )
            .with_object(
                SceneObject::new(ObjectKind::Receiver {
                    expected_value: vec![ObjectId::from("key")],
                })
                .with_id("door"),
            )
            .with_object(slot("s1", "puzzle1", Some(keyed(&[("s1", 2), ("s2", 1)]))))
            .with_object(slot("s2", "puzzle1", None))
            .with_object(nav("hall"));
        let hall = Scene::new("Hall", "hall").with_object(nav("room"));

        let catalog = SceneCatalog::new(Route::from("room"), vec![room, hall]).unwrap();

        assert_eq!(catalog.initial_route().as_str(), "room");
        assert_eq!(catalog.group_ids().len(), 1);
        assert!(catalog.clone().with_initial_route(Route::from("hall")).is_ok());
        assert!(catalog.with_initial_route(Route::from("attic")).is_err());
    }

    #[test]
    fn reports_route_problems() {
        let found = issues(
            "attic",
            vec![
                Scene::new("A", "room").with_object(nav("cellar")),
                Scene::new("B", "room").with_object(nav("")),
            ],
        );

        assert!(found.contains(&CatalogIssue::DuplicateRoute {
            route: "room".into()
        }));
        assert!(found.contains(&CatalogIssue::MissingInitialRoute {
            route: "attic".into()
        }));
        assert!(found.contains(&CatalogIssue::DanglingRoute {
            scene: "room".into(),
            route: "cellar".into()
        }));
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn reports_object_problems() {
        let scene = Scene::new("Room", "room")
            .with_object(SceneObject::new(ObjectKind::Draggable))
            .with_object(SceneObject::new(ObjectKind::Decorative).with_id("lamp"))
            .with_object(SceneObject::new(ObjectKind::Decorative).with_id("lamp"))
            .with_object(
                SceneObject::new(ObjectKind::Receiver {
                    expected_value: vec![ObjectId::from("lamp")],
                })
                .with_id("socket"),
            )
            .with_object(
                SceneObject::new(ObjectKind::Sequence {
                    primary: false,
                    scenario: None,
                })
                .with_id("bell"),
            );

        let found = issues("room", vec![scene]);

        assert!(found.contains(&CatalogIssue::MissingObjectId {
            scene: "room".into(),
            index: 0,
            kind: "draggable".into()
        }));
        assert!(found.contains(&CatalogIssue::DuplicateObjectId {
            scene: "room".into(),
            id: "lamp".into()
        }));
        assert!(found.contains(&CatalogIssue::UnknownExpectedValue {
            scene: "room".into(),
            receiver: "socket".into(),
            item: "lamp".into()
        }));
        assert!(found.contains(&CatalogIssue::MissingGroupId {
            scene: "room".into(),
            id: "bell".into(),
            kind: "sequence".into()
        }));
    }

    #[test]
    fn reports_group_problems() {
        let scene = Scene::new("Room", "room")
            // two primaries
            .with_object(slot("a1", "twins", Some(keyed(&[("a1", 1), ("a2", 1)]))))
            .with_object(slot("a2", "twins", Some(keyed(&[("a1", 1), ("a2", 1)]))))
            // scenario problems
            .with_object(slot("b1", "broken", Some(keyed(&[("b1", 5), ("ghost", 1)]))))
            .with_object(slot("b2", "broken", None))
            // reserved key
            .with_object(slot("c1", "inventory", Some(keyed(&[("c1", 1)]))));

        let found = issues("room", vec![scene]);

        assert!(found.contains(&CatalogIssue::PrimaryCount {
            scene: "room".into(),
            group: "twins".into(),
            count: 2
        }));
        assert!(found.contains(&CatalogIssue::UnknownScenarioOption {
            scene: "room".into(),
            group: "broken".into(),
            slot: "b1".into(),
            option: "5".into()
        }));
        assert!(found.contains(&CatalogIssue::UnknownScenarioMember {
            scene: "room".into(),
            group: "broken".into(),
            member: "ghost".into()
        }));
        assert!(found.contains(&CatalogIssue::SlotWithoutTarget {
            scene: "room".into(),
            group: "broken".into(),
            slot: "b2".into()
        }));
        assert!(found.contains(&CatalogIssue::ReservedGroupId {
            scene: "room".into(),
            group: "inventory".into()
        }));
    }

    #[test]
    fn reports_shape_and_mixing_problems() {
        let sequence = |id: &str, group: &str, scenario: Option<Scenario>| {
            SceneObject::new(ObjectKind::Sequence {
                primary: scenario.is_some(),
                scenario,
            })
            .with_id(id)
            .in_group(group)
        };
        let scene = Scene::new("Room", "room")
            .with_object(sequence("x", "bells", Some(keyed(&[("x", 1)]))))
            .with_object(slot("m1", "mixed", Some(keyed(&[("m1", 1)]))))
            .with_object(sequence("m2", "mixed", None));

        let found = issues("room", vec![scene]);

        assert!(found.contains(&CatalogIssue::ScenarioShape {
            scene: "room".into(),
            group: "bells".into(),
            expected: "a non-empty ordered"
        }));
        assert!(found.contains(&CatalogIssue::MixedGroupKinds {
            scene: "room".into(),
            group: "mixed".into()
        }));
    }

    #[test]
    fn reports_duplicate_dialog_nodes_and_shared_groups() {
        let tree = DialogNode::new("hi", LocalizedText::new("en", "Hi"))
            .with_child(DialogNode::new("bye", LocalizedText::new("en", "Bye")))
            .with_child(DialogNode::new("bye", LocalizedText::new("en", "Later")));
        let room = Scene::new("Room", "room")
            .with_object(SceneObject::new(ObjectKind::Dialog { dialog_tree: tree }).with_id("npc"))
            .with_object(slot("p1", "lock", Some(keyed(&[("p1", 1)]))));
        let hall = Scene::new("Hall", "hall").with_object(slot("p2", "lock", Some(keyed(&[("p2", 1)]))));

        let found = issues("room", vec![room, hall]);

        assert!(found.contains(&CatalogIssue::DuplicateDialogNode {
            scene: "room".into(),
            object: "npc".into(),
            node: "bye".into()
        }));
        assert!(found.contains(&CatalogIssue::GroupInSeveralScenes {
            group: "lock".into(),
            first: "room".into(),
            second: "hall".into()
        }));
    }

    #[test]
    fn parses_catalog_document() {
        let json = r#"{
            "initialRoute": "room",
            "scenes": [{
                "name": "Room",
                "route": "room",
                "background": {"type": "image", "src": "room.png"},
                "objects": [{"kind": "blank"}]
            }]
        }"#;
        let document: CatalogDocument = serde_json::from_str(json).unwrap();
        let catalog = SceneCatalog::try_from(document).unwrap();
        assert_eq!(catalog.scenes().len(), 1);
    }
}
