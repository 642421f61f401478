//! Small hand-built scenes covering every object kind.

use std::collections::BTreeMap;

use sceneforge_domain::{
    DialogNode, Flag, GatingRules, LocalizedText, ObjectId, ObjectKind, OptionId, Position, Route,
    Scenario, Scene, SceneCatalog, SceneObject, SlotOption, Visual,
};

fn nav(route: Option<&str>) -> SceneObject {
    SceneObject::new(ObjectKind::Nav {
        route: route.map(Route::from),
    })
}

/// `room`: a single-use key, the door it opens and the door's open state.
pub fn key_and_door() -> Scene {
    Scene::new("Room", "room")
        .with_background(Visual::image("room.png"))
        .with_object(
            SceneObject::new(ObjectKind::Collectable {
                uses_remaining: Some(1),
                inventory_visual: Some(Visual::image("key-inventory.png")),
            })
            .with_id("key")
            .at(Position::new(10.0, 10.0, 10.0, 10.0).with_z_index(1))
            .with_visual(Visual::image("key.png")),
        )
        .with_object(
            SceneObject::new(ObjectKind::Receiver {
                expected_value: vec![ObjectId::from("key")],
            })
            .with_id("door")
            .at(Position::new(50.0, 20.0, 30.0, 60.0).with_z_index(1))
            .with_visual(Visual::image("door-closed.png"))
            .with_rules(GatingRules::default().hidden_when([Flag::from("door")])),
        )
        .with_object(
            SceneObject::new(ObjectKind::Decorative)
                .with_id("open-door")
                .at(Position::new(50.0, 20.0, 30.0, 60.0).with_z_index(2))
                .with_visual(Visual::image("door-open.png"))
                .with_rules(GatingRules::default().shown_when([Flag::from("door")])),
        )
        .with_object(
            nav(Some("hall"))
                .with_id("to-hall")
                .at(Position::new(90.0, 0.0, 10.0, 100.0))
                .with_rules(GatingRules::default().activated_when([Flag::from("door")])),
        )
        .with_object(
            nav(None)
                .with_id("painted-door")
                .at(Position::new(0.0, 90.0, 10.0, 10.0)),
        )
        .with_object(
            SceneObject::new(ObjectKind::Decorative)
                .with_id("lamp")
                .with_visual(Visual::image("lamp-off.png"))
                .with_rules(GatingRules::default().hidden_when([Flag::from("lamp")])),
        )
        .with_object(
            SceneObject::new(ObjectKind::Blank)
                .with_id("rug")
                .with_visual(Visual::image("rug.png")),
        )
}

/// `hall`: leads back to the room.
pub fn hall() -> Scene {
    Scene::new("Hall", "hall").with_object(nav(Some("room")).with_id("back"))
}

fn slot(id: &str, primary: bool) -> SceneObject {
    let scenario = primary.then(|| {
        let mut targets = BTreeMap::new();
        targets.insert(ObjectId::from("slot1_1"), OptionId::from(2));
        targets.insert(ObjectId::from("slot1_2"), OptionId::from(3));
        Scenario::Keyed(targets)
    });
    SceneObject::new(ObjectKind::Slot {
        options_list: (1u32..=3)
            .map(|n| SlotOption::new(n, Visual::image(format!("slot-{n}.png"))))
            .collect(),
        selected_option_id: OptionId::from(1),
        primary,
        scenario,
    })
    .with_id(id)
    .in_group("puzzle1")
}

/// `trash`: two slots that solve `puzzle1` at options 2 and 3.
pub fn slot_puzzle() -> Scene {
    Scene::new("Trash", "trash")
        .with_object(slot("slot1_1", true))
        .with_object(slot("slot1_2", false))
        .with_object(
            SceneObject::new(ObjectKind::Decorative)
                .with_id("trash-open")
                .with_rules(GatingRules::default().shown_when([Flag::from("puzzle1")])),
        )
}

/// `vault`: a two-use key and a chest that needs it once.
pub fn vault() -> Scene {
    Scene::new("Vault", "vault")
        .with_object(
            SceneObject::new(ObjectKind::Collectable {
                uses_remaining: Some(2),
                inventory_visual: None,
            })
            .with_id("spare-key"),
        )
        .with_object(
            SceneObject::new(ObjectKind::Receiver {
                expected_value: vec![ObjectId::from("spare-key")],
            })
            .with_id("chest")
            .at(Position::new(0.0, 0.0, 20.0, 20.0)),
        )
}

/// `dials`: three four-position dials solving at 1, 3 and 2. The first dial
/// starts on its last position.
pub fn dials() -> Scene {
    let dial = |id: &str, start: u32| {
        let primary = id == "dial1";
        let scenario = primary.then(|| {
            Scenario::Keyed(BTreeMap::from([
                (ObjectId::from("dial1"), OptionId::from(1)),
                (ObjectId::from("dial2"), OptionId::from(3)),
                (ObjectId::from("dial3"), OptionId::from(2)),
            ]))
        });
        SceneObject::new(ObjectKind::Slot {
            options_list: (1u32..=4)
                .map(|n| SlotOption::new(n, Visual::image(format!("dial-{n}.png"))))
                .collect(),
            selected_option_id: OptionId::from(start),
            primary,
            scenario,
        })
        .with_id(id)
        .in_group("dials")
    };
    Scene::new("Dials", "dials")
        .with_object(dial("dial1", 4))
        .with_object(dial("dial2", 3))
        .with_object(dial("dial3", 1))
}

/// `bells`: tap x, y, z in order.
pub fn sequence_room() -> Scene {
    let bell = |id: &str, primary: bool| {
        SceneObject::new(ObjectKind::Sequence {
            primary,
            scenario: primary.then(|| {
                Scenario::Ordered(vec![
                    ObjectId::from("x"),
                    ObjectId::from("y"),
                    ObjectId::from("z"),
                ])
            }),
        })
        .with_id(id)
        .in_group("bells")
    };
    Scene::new("Bells", "bells")
        .with_object(bell("x", true).resolving("bells-rung"))
        .with_object(bell("y", false))
        .with_object(bell("z", false))
}

/// `talk`: a dialog, a note and a drag-to-socket puzzle.
pub fn dialog_room() -> Scene {
    let tree = DialogNode::new("root", LocalizedText::new("en", "Hello").with("ru", "Привет"))
        .with_child(
            DialogNode::new("who", LocalizedText::new("en", "A virus."))
                .with_choice_label(LocalizedText::new("en", "Who are you?"))
                .with_child(
                    DialogNode::new("end", LocalizedText::new("en", "Goodbye."))
                        .with_choice_label(LocalizedText::new("en", "I see."))
                        .resolving("virus-talked"),
                ),
        )
        .with_child(DialogNode::new("bye", LocalizedText::new("en", "Bye")));

    Scene::new("Talk", "talk")
        .with_object(SceneObject::new(ObjectKind::Dialog { dialog_tree: tree }).with_id("virus"))
        .with_object(
            SceneObject::new(ObjectKind::Paper {
                content: Visual::image("note-content.png"),
            })
            .with_id("note"),
        )
        .with_object(
            SceneObject::new(ObjectKind::Draggable)
                .with_id("battery")
                .at(Position::new(5.0, 5.0, 5.0, 5.0))
                .with_rules(GatingRules::default().hidden_when([Flag::from("socket")])),
        )
        .with_object(
            SceneObject::new(ObjectKind::Receiver {
                expected_value: vec![ObjectId::from("battery")],
            })
            .with_id("socket")
            .in_group("power")
            .at(Position::new(60.0, 60.0, 20.0, 20.0)),
        )
}

/// Every fixture scene, starting in `room`.
pub fn catalog() -> SceneCatalog {
    SceneCatalog::new(
        Route::from("room"),
        vec![
            key_and_door(),
            hall(),
            slot_puzzle(),
            sequence_room(),
            dialog_room(),
            vault(),
            dials(),
        ],
    )
    .expect("fixture catalog is valid")
}
