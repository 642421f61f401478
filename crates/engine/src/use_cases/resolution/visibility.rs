//! Per-object visibility, interactivity and stacking.

use sceneforge_domain::{GroupId, ObjectKind, ResolutionState, Scene, SceneObject};

/// Resolved state of one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub visible: bool,
    pub interactive: bool,
}

/// Evaluate gating rules for one object.
///
/// A collectable is hidden once any inventory entry was collected from it,
/// even after its uses run out.
pub fn evaluate(object: &SceneObject, state: &ResolutionState) -> Visibility {
    let flags = &state.resolved_flags;
    let consumed = matches!(object.kind, ObjectKind::Collectable { .. })
        && object
            .id
            .as_ref()
            .is_some_and(|id| state.inventory.contains(id));

    let visible = object.rules.is_shown(flags) && !object.rules.is_hidden(flags) && !consumed;
    let interactive =
        visible && !object.rules.is_deactivated(flags) && object.rules.is_activated(flags);

    Visibility {
        visible,
        interactive,
    }
}

/// Objects bottom to top: ascending `zIndex`, then declaration order.
pub fn stacking_order(scene: &Scene) -> Vec<&SceneObject> {
    let mut objects: Vec<&SceneObject> = scene.objects.iter().collect();
    // Stable sort keeps declaration order within a layer.
    objects.sort_by_key(|o| o.position.stacking());
    objects
}

/// Topmost interactive receiver whose bounds strictly contain the point.
pub fn drop_target<'a>(
    scene: &'a Scene,
    state: &ResolutionState,
    x: f32,
    y: f32,
    group_id: Option<&GroupId>,
) -> Option<&'a SceneObject> {
    stacking_order(scene)
        .into_iter()
        .rev()
        .filter(|o| matches!(o.kind, ObjectKind::Receiver { .. }))
        .filter(|o| group_id.map_or(true, |g| o.belongs_to(g)))
        .filter(|o| evaluate(o, state).interactive)
        .find(|o| o.position.contains(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sceneforge_domain::{Flag, GatingRules, InventoryItem, ObjectId, Position, Visual};

    fn receiver(id: &str, position: Position) -> SceneObject {
        SceneObject::new(ObjectKind::Receiver {
            expected_value: vec![ObjectId::from("key")],
        })
        .with_id(id)
        .at(position)
    }

    fn with_flags(names: &[&str]) -> ResolutionState {
        let mut state = ResolutionState::new();
        for name in names {
            state.resolved_flags.insert(Flag::from(*name));
        }
        state
    }

    #[test]
    fn show_is_any_and_hide_is_all() {
        let object = SceneObject::new(ObjectKind::Decorative).with_rules(
            GatingRules::default()
                .shown_when([Flag::from("a"), Flag::from("b")])
                .hidden_when([Flag::from("c"), Flag::from("d")]),
        );

        assert!(!evaluate(&object, &with_flags(&[])).visible);
        assert!(evaluate(&object, &with_flags(&["b"])).visible);
        assert!(evaluate(&object, &with_flags(&["a", "c"])).visible);
        assert!(!evaluate(&object, &with_flags(&["a", "c", "d"])).visible);
    }

    #[test]
    fn interactivity_needs_visibility_and_activation() {
        let object = SceneObject::new(ObjectKind::Decorative).with_rules(
            GatingRules::default()
                .activated_when([Flag::from("power")])
                .deactivated_when([Flag::from("broken")]),
        );

        assert_eq!(
            evaluate(&object, &with_flags(&[])),
            Visibility {
                visible: true,
                interactive: false
            }
        );
        assert!(evaluate(&object, &with_flags(&["power"])).interactive);
        assert!(!evaluate(&object, &with_flags(&["power", "broken"])).interactive);
    }

    #[test]
    fn consumed_collectables_stay_hidden() {
        let key = SceneObject::new(ObjectKind::Collectable {
            uses_remaining: Some(1),
            inventory_visual: None,
        })
        .with_id("key");
        let mut state = ResolutionState::new();
        assert!(evaluate(&key, &state).visible);

        state
            .inventory
            .push(InventoryItem::new("key", Visual::Trigger, Some(0)));
        assert_eq!(
            evaluate(&key, &state),
            Visibility {
                visible: false,
                interactive: false
            }
        );
    }

    #[test]
    fn stacking_orders_by_z_then_declaration() {
        let scene = Scene::new("Room", "room")
            .with_object(SceneObject::new(ObjectKind::Blank).with_id("top").at(
                Position::new(0.0, 0.0, 1.0, 1.0).with_z_index(5),
            ))
            .with_object(SceneObject::new(ObjectKind::Blank).with_id("first"))
            .with_object(SceneObject::new(ObjectKind::Blank).with_id("second"));

        let ids: Vec<&str> = stacking_order(&scene)
            .iter()
            .filter_map(|o| o.id.as_ref().map(|id| id.as_str()))
            .collect();
        assert_eq!(ids, vec!["first", "second", "top"]);
    }

    #[test]
    fn drop_target_prefers_topmost_and_respects_bounds() {
        let scene = Scene::new("Room", "room")
            .with_object(receiver("low", Position::new(0.0, 0.0, 100.0, 100.0)))
            .with_object(receiver(
                "high",
                Position::new(40.0, 40.0, 20.0, 20.0).with_z_index(2),
            ));
        let state = ResolutionState::new();

        let hit = |x, y| drop_target(&scene, &state, x, y, None).and_then(|o| o.id.clone());
        assert_eq!(hit(50.0, 50.0), Some(ObjectId::from("high")));
        assert_eq!(hit(10.0, 10.0), Some(ObjectId::from("low")));
        // Edges are outside.
        assert_eq!(hit(40.0, 50.0), Some(ObjectId::from("low")));
        assert_eq!(hit(0.0, 0.0), None);
    }

    #[test]
    fn drop_target_filters_by_group() {
        let scene = Scene::new("Room", "room")
            .with_object(receiver("a", Position::new(0.0, 0.0, 10.0, 10.0)).in_group("left"))
            .with_object(
                receiver("b", Position::new(0.0, 0.0, 10.0, 10.0).with_z_index(1))
                    .in_group("right"),
            );
        let state = ResolutionState::new();

        let target = drop_target(&scene, &state, 5.0, 5.0, Some(&GroupId::from("left")));
        assert!(target.is_some_and(|o| o.has_id("a")));
    }
}
