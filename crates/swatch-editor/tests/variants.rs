//! Integration tests: variant groups and protected deletion.

use pretty_assertions::assert_eq;
use swatch_core::id::NodeId;
use swatch_core::model::*;
use swatch_core::props::{PropValue, Props};
use swatch_core::registry::Registry;
use swatch_editor::{
    CanvasConfig, DeleteOutcome, EditorSession, GraphStore, VariantMode,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn id(s: &str) -> NodeId {
    NodeId::intern(s)
}

fn session() -> EditorSession {
    init_logging();
    let mut session = EditorSession::new(Registry::builtin(), CanvasConfig::default())
        .with_clock(|| 1_700_000_000_000);
    session.bootstrap();
    session
}

fn props_of(session: &EditorSession, node: &str) -> Props {
    session.graph().node(id(node)).unwrap().data().unwrap().props.clone()
}

// ─── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn button_variant_then_base_delete() {
    init_logging();
    let registry = Registry::builtin();
    let mut props = Props::new();
    props.insert("variant".into(), PropValue::option("default"));
    let mut store = GraphStore::new(CanvasConfig::default());
    store.set_nodes(vec![GraphNode::component(
        id("button"),
        Position::new(50.0, 200.0),
        NodeData {
            component_id: id("button"),
            props: props.clone(),
            label: "Button".into(),
            category: Category::Form,
        },
    )]);

    let v1 = store.add_variant(id("button"), VariantMode::Default, None).unwrap();
    assert_eq!(v1.as_str(), "button-variant-1");
    let variant = store.node(v1).unwrap();
    assert_eq!(variant.data().unwrap().props, props);
    assert_eq!(variant.position, Position::new(50.0 + 414.0, 200.0));

    // Group has two members now, so the base goes for real
    assert_eq!(
        store.protected_delete_node(id("button"), &registry),
        DeleteOutcome::Deleted
    );
    let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["button-variant-1"]);
}

#[test]
fn sole_avatar_resets_to_empty_props() {
    let mut session = session();
    let count = session.graph().nodes().len();

    assert_eq!(session.delete(id("avatar")), DeleteOutcome::ResetToDefaults);
    assert_eq!(session.graph().nodes().len(), count);
    assert_eq!(props_of(&session, "avatar"), Props::new());
    assert_eq!(session.notifications().len(), 1);
}

// ─── Variant creation ───────────────────────────────────────────────────

#[test]
fn nth_variant_gets_next_index() {
    let mut session = session();
    for n in 1..=3 {
        let v = session
            .add_variant(id("badge"), VariantMode::Default, None)
            .unwrap();
        assert_eq!(v.as_str(), format!("badge-variant-{n}"));
    }
    assert_eq!(session.graph().variant_group(id("badge")).len(), 4);
}

#[test]
fn variants_line_up_right_of_rightmost_member() {
    let mut session = session();
    let base = session.graph().node(id("card")).unwrap().position;
    let v1 = session.add_variant(id("card"), VariantMode::Default, None).unwrap();
    let v2 = session.add_variant(id("card"), VariantMode::Default, None).unwrap();

    assert_eq!(session.graph().node(v1).unwrap().position, Position::new(base.x + 414.0, base.y));
    assert_eq!(session.graph().node(v2).unwrap().position, Position::new(base.x + 828.0, base.y));
    assert_eq!(
        session.graph().node(v2).unwrap().data().unwrap().label,
        "Card • Variant 2"
    );
}

#[test]
fn variant_props_do_not_alias_base() {
    let mut session = session();
    let v1 = session
        .add_variant(id("button"), VariantMode::Default, None)
        .unwrap();
    let snapshot = props_of(&session, v1.as_str());

    session
        .edit_prop(id("button"), "variant", PropValue::option("destructive"))
        .unwrap();
    assert_eq!(props_of(&session, v1.as_str()), snapshot);
    assert_eq!(
        session.instances().get_instance(v1).unwrap().props,
        snapshot
    );
}

#[test]
fn duplicate_mode_copies_chosen_member() {
    let mut session = session();
    let v1 = session
        .add_variant(id("button"), VariantMode::Default, None)
        .unwrap();
    session
        .edit_prop(v1, "size", PropValue::option("sm"))
        .unwrap();

    let v2 = session
        .add_variant(id("button"), VariantMode::Duplicate, Some(v1))
        .unwrap();
    assert_eq!(
        props_of(&session, v2.as_str()).get("size"),
        Some(&PropValue::option("sm"))
    );
    // Default mode still copies the base
    let v3 = session
        .add_variant(id("button"), VariantMode::Default, None)
        .unwrap();
    assert_eq!(
        props_of(&session, v3.as_str()).get("size"),
        Some(&PropValue::option("default"))
    );
}

#[test]
fn duplicate_mode_ignores_members_of_other_groups() {
    let mut session = session();
    session
        .edit_prop(id("button"), "size", PropValue::option("lg"))
        .unwrap();

    let v1 = session
        .add_variant(id("button"), VariantMode::Duplicate, Some(id("slider")))
        .unwrap();
    assert_eq!(v1.as_str(), "button-variant-1");
    // Falls back to the rightmost member of the button group
    assert_eq!(props_of(&session, v1.as_str()), props_of(&session, "button"));
    assert_eq!(
        props_of(&session, v1.as_str()).get("size"),
        Some(&PropValue::option("lg"))
    );
    assert!(!props_of(&session, v1.as_str()).contains_key("max"));
}

// ─── Protected deletion ─────────────────────────────────────────────────

#[test]
fn deleting_a_member_leaves_the_rest_untouched() {
    let mut session = session();
    let v1 = session.add_variant(id("input"), VariantMode::Default, None).unwrap();
    let v2 = session.add_variant(id("input"), VariantMode::Default, None).unwrap();
    let mut expected: Vec<GraphNode> = session.graph().nodes().to_vec();
    expected.retain(|n| n.id != v1);

    assert_eq!(session.delete(v1), DeleteOutcome::Deleted);
    assert_eq!(session.graph().nodes(), expected.as_slice());
    assert!(session.instances().contains(v2));
    assert!(session.notifications().is_empty());
}

#[test]
fn decorations_are_not_deletable() {
    let mut session = session();
    let count = session.graph().nodes().len();
    assert_eq!(session.delete(id("category-label-form")), DeleteOutcome::NotFound);
    assert_eq!(session.delete(id("no-such-node")), DeleteOutcome::NotFound);
    assert_eq!(session.graph().nodes().len(), count);
}

#[test]
fn copies_are_unique_within_one_millisecond() {
    let mut session = session();
    let a = session.duplicate(id("switch")).unwrap();
    let b = session.duplicate(id("switch")).unwrap();
    assert_eq!(a.as_str(), "switch-copy-1700000000000");
    assert_eq!(b.as_str(), "switch-copy-1700000000001");
    let base = session.graph().node(id("switch")).unwrap().position;
    assert_eq!(
        session.graph().node(a).unwrap().position,
        Position::new(base.x + 50.0, base.y + 50.0)
    );
}
