use geom_kernel::{Point3d, Transform};
use scene_export::{
    export_model, extract_children, extract_children_with, parse_document, serialize_entity,
    serialize_entity_with, to_json_pretty, ExportError, ExportRecord, TraversalLimits,
};
use scene_types::{EntityId, Scene};
use serde_json::json;

/// A scene with one placed instance of a rectangular panel. The panel
/// definition holds four vertices, a face, and one free-standing edge.
fn panel_scene() -> (Scene, EntityId) {
    let mut scene = Scene::new("workshop");
    let def = scene.add_definition("panel", "a flat panel");
    let a = scene.add_vertex(Some(def), Point3d::new(0.0, 0.0, 0.0));
    let b = scene.add_vertex(Some(def), Point3d::new(2.0, 0.0, 0.0));
    let c = scene.add_vertex(Some(def), Point3d::new(2.0, 1.0, 0.0));
    let d = scene.add_vertex(Some(def), Point3d::new(0.0, 1.0, 0.0));
    let face = scene.add_face(Some(def), vec![a, b, c, d], None);
    scene.set_material(face, "pine");
    scene.add_edge(Some(def), a, b);
    let instance = scene.add_instance(None, def, Transform::translation(3.0, 0.0, 1.0));
    (scene, instance)
}

// ── Schema ──

#[test]
fn exported_document_matches_the_wire_schema() {
    let (scene, _) = panel_scene();
    let document = export_model(&scene).unwrap();
    let json = to_json_pretty(&document);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["model_name"], "workshop");
    let objects = value["entities"].as_array().unwrap();
    assert_eq!(objects.len(), 1);

    let object = &objects[0];
    assert_eq!(object["name"], "panel");
    assert_eq!(object["description"], "a flat panel");
    assert_eq!(object["exact_position"], json!([3.0, 0.0, 1.0]));
    assert_eq!(object["position"], json!({"x": 3.0, "y": 0.0, "z": 1.0}));

    let children = object["entities"].as_array().unwrap();
    assert_eq!(children.len(), 6);
    assert_eq!(children[0], json!({"type": "Vertex"}));
    assert_eq!(
        children[4],
        json!({
            "type": "Face",
            "points": [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [2.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            "material": "pine",
        })
    );
    assert_eq!(
        children[5],
        json!({
            "type": "Edge",
            "start_point": {"x": 0.0, "y": 0.0, "z": 0.0},
            "end_point": {"x": 2.0, "y": 0.0, "z": 0.0},
            "length": 2.0,
        })
    );

    assert_eq!(parse_document(&json).unwrap(), document);
}

#[test]
fn loose_geometry_at_root_is_not_an_object() {
    let (mut scene, _) = panel_scene();
    let a = scene.add_vertex(None, Point3d::ORIGIN);
    let b = scene.add_vertex(None, Point3d::new(1.0, 0.0, 0.0));
    scene.add_edge(None, a, b);

    let document = export_model(&scene).unwrap();
    assert_eq!(document.entities.len(), 1);
    assert_eq!(document.entities[0].name, "panel");
}

#[test]
fn empty_group_serializes_with_an_empty_entity_list() {
    let mut scene = Scene::new("empty");
    let def = scene.add_definition("placeholder", "");
    let group = scene.add_group(None, def, Transform::identity());
    scene.set_material(group, "oak");

    let record = serialize_entity(&scene, group).unwrap();
    assert_eq!(
        record,
        ExportRecord::Group {
            material: Some("oak".into()),
            entities: Vec::new(),
        }
    );

    // The empty child list must stay an array on the wire, not null.
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["entities"], json!([]));
}

#[test]
fn leaf_geometry_serializes_without_children() {
    let mut scene = Scene::new("loose");
    let a = scene.add_vertex(None, Point3d::ORIGIN);
    let b = scene.add_vertex(None, Point3d::new(0.0, 3.0, 0.0));
    let edge = scene.add_edge(None, a, b);

    let record = serialize_entity(&scene, edge).unwrap();
    match record {
        ExportRecord::Edge { length, .. } => assert_eq!(length, 3.0),
        other => panic!("expected an edge record, got {other:?}"),
    }
    assert!(extract_children(&scene, edge).unwrap().is_empty());
}

// ── Traversal ──

#[test]
fn nested_instances_recurse_through_their_definitions() {
    let mut scene = Scene::new("nested");
    let inner = scene.add_definition("core", "");
    scene.add_vertex(Some(inner), Point3d::ORIGIN);
    let outer = scene.add_definition("shell", "");
    scene.add_instance(Some(outer), inner, Transform::identity());
    let root = scene.add_group(None, outer, Transform::identity());

    let record = serialize_entity(&scene, root).unwrap();
    let nested = record.entities();
    assert_eq!(nested.len(), 1);
    assert!(matches!(nested[0], ExportRecord::ComponentInstance { .. }));
    assert_eq!(nested[0].entities(), &[ExportRecord::Vertex]);
}

#[test]
fn shared_definitions_export_identical_subtrees() {
    let mut scene = Scene::new("diamond");
    let wheel = scene.add_definition("wheel", "");
    scene.add_vertex(Some(wheel), Point3d::ORIGIN);
    let axle = scene.add_definition("axle", "");
    scene.add_group(Some(axle), wheel, Transform::translation(-1.0, 0.0, 0.0));
    scene.add_group(Some(axle), wheel, Transform::translation(1.0, 0.0, 0.0));
    let root = scene.add_group(None, axle, Transform::identity());

    // Two references to one definition are sharing, not a cycle.
    let record = serialize_entity(&scene, root).unwrap();
    assert_eq!(record.entities().len(), 2);
    assert_eq!(record.entities()[0], record.entities()[1]);
}

#[test]
fn definition_cycle_is_reported() {
    let mut scene = Scene::new("cycle");
    let def_a = scene.add_definition("a", "");
    let def_b = scene.add_definition("b", "");
    scene.add_group(Some(def_a), def_b, Transform::identity());
    scene.add_group(Some(def_b), def_a, Transform::identity());
    scene.add_instance(None, def_a, Transform::identity());

    let err = export_model(&scene).unwrap_err();
    assert_eq!(
        err,
        ExportError::DefinitionCycle {
            definition: "a".into()
        }
    );
}

#[test]
fn dangling_entity_handle_is_rejected() {
    let scene = Scene::new("blank");
    let err = serialize_entity(&scene, EntityId::default()).unwrap_err();
    assert_eq!(err, ExportError::DanglingReference);
}

// ── Budgets ──

/// Five levels of group nesting with a single vertex at the bottom.
fn deep_scene() -> (Scene, EntityId) {
    let mut scene = Scene::new("deep");
    let mut def = scene.add_definition("level-5", "");
    scene.add_vertex(Some(def), Point3d::ORIGIN);
    for level in (1..5).rev() {
        let outer = scene.add_definition(&format!("level-{level}"), "");
        scene.add_group(Some(outer), def, Transform::identity());
        def = outer;
    }
    let root = scene.add_group(None, def, Transform::identity());
    (scene, root)
}

#[test]
fn depth_budget_stops_runaway_nesting() {
    let (scene, root) = deep_scene();

    assert!(serialize_entity(&scene, root).is_ok());

    let tight = TraversalLimits {
        max_depth: 3,
        max_nodes: 100_000,
    };
    let err = serialize_entity_with(&scene, root, tight).unwrap_err();
    assert_eq!(err, ExportError::BudgetExceeded { limit: 3 });
}

#[test]
fn node_budget_stops_runaway_output() {
    let mut scene = Scene::new("wide");
    let def = scene.add_definition("cloud", "");
    for i in 0..10 {
        scene.add_vertex(Some(def), Point3d::new(i as f64, 0.0, 0.0));
    }
    let group = scene.add_group(None, def, Transform::identity());

    assert_eq!(extract_children(&scene, group).unwrap().len(), 10);

    let tight = TraversalLimits {
        max_depth: 64,
        max_nodes: 4,
    };
    let err = extract_children_with(&scene, group, tight).unwrap_err();
    assert_eq!(err, ExportError::BudgetExceeded { limit: 4 });
}
