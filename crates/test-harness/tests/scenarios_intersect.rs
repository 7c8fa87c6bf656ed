//! Intersection and reporting scenarios over multi-object models.
//!
//! These walk the full analysis path: ancestor resolution, the candidate
//! sweep, and per-hit coordinate conversion.

use geom_kernel::Point3d;
use shape_analysis::{find_intersections, top_level_containers, AnalysisError, ShapeClass};
use test_harness::assertions::assert_intersection_labels;
use test_harness::helpers::segment;
use test_harness::{HarnessError, SceneBuilder};

// ── Scenario 1: Dockside overlaps ───────────────────────────────────────

#[test]
fn test_dockside_overlaps_in_pool_order() {
    let mut m = SceneBuilder::new("dockside");
    m.cube_definition("crate", 2.0).unwrap();
    m.box_definition("plank", 4.0, 1.0, 1.0).unwrap();
    m.place_group("hold", "crate", [0., 0., 0.]).unwrap();
    m.place_group("bumper", "plank", [1.5, 1.5, 0.]).unwrap();
    m.place_group("rail", "plank", [2.0, 0.0, 0.0]).unwrap();
    m.place_group("spare", "plank", [10., 0., 0.]).unwrap();
    m.tag("bumper", "Fenders").unwrap();

    m.assert_intersects("hold", "bumper")
        .unwrap()
        .assert_intersects("hold", "rail")
        .unwrap()
        .assert_clear("hold", "spare")
        .unwrap();

    let report = m.report("hold").unwrap();
    assert_intersection_labels(
        &report,
        &["Definition: plank, Tag: Fenders", "Definition: plank, Tag: "],
        "hold overlaps",
    )
    .unwrap();

    // Global coordinates are the selection's own origin; local ones sit in
    // each hit's frame. Fractional parts truncate toward zero.
    assert_eq!(report.intersections[0].global, [0, 0, 0]);
    assert_eq!(report.intersections[0].local, [-1, -1, 0]);
    assert_eq!(report.intersections[1].local, [-2, 0, 0]);
}

// ── Scenario 2: Nested cargo ────────────────────────────────────────────

#[test]
fn test_own_cargo_is_never_a_hit() {
    let mut m = SceneBuilder::new("hull");
    m.box_definition("hull", 6.0, 3.0, 2.0).unwrap();
    m.cube_definition("ballast", 1.0).unwrap();
    m.place_group("ship", "hull", [0., 0., 0.]).unwrap();
    let cargo = m
        .place_group_in("cargo", "ballast", "hull", [1., 1., 0.])
        .unwrap();
    let ship = m.entity("ship").unwrap();

    // The ballast lives inside the hull's own definition. Its bounds
    // overlap the hull's, yet it is excluded from the hull's hits.
    m.assert_intersects("ship", "cargo").unwrap();
    assert!(find_intersections(&m.scene, ship, &[cargo]).is_empty());

    // An identical box placed at the root is reported.
    let drifter = m.place_group("drifter", "ballast", [1., 1., 0.]).unwrap();
    assert_eq!(
        find_intersections(&m.scene, ship, &[cargo, drifter]),
        vec![drifter]
    );
}

// ── Scenario 3: Candidate pool order ────────────────────────────────────

#[test]
fn test_pool_lists_groups_before_instances() {
    let mut m = SceneBuilder::new("pool");
    m.cube_definition("block", 1.0).unwrap();
    let i1 = m.place_instance("i1", "block", [0., 0., 0.]).unwrap();
    let g1 = m.place_group("g1", "block", [0.5, 0., 0.]).unwrap();
    let i2 = m.place_instance("i2", "block", [0., 0.5, 0.]).unwrap();

    assert_eq!(top_level_containers(&m.scene), vec![g1, i1, i2]);

    // All three overlap, so the report for the group sees both instances,
    // in pool order.
    let report = m.report("g1").unwrap();
    assert_eq!(report.intersections.len(), 2);
    assert_eq!(report.intersections[0].entity, i1);
    assert_eq!(report.intersections[1].entity, i2);
}

// ── Scenario 4: Face selection ──────────────────────────────────────────

#[test]
fn test_face_selection_walks_up_to_its_assembly() {
    let mut m = SceneBuilder::new("walkup");
    m.cube_definition("crate", 2.0).unwrap();
    m.cube_definition("ballast", 1.0).unwrap();
    m.place_group("hold", "crate", [2., 0., 0.]).unwrap();
    m.tag("hold", "Deck").unwrap();
    m.place_group("weight", "ballast", [2.5, 0.5, 0.]).unwrap();
    m.tag("weight", "Bilge").unwrap();

    let face = m.face_of("hold").unwrap();
    let report = m.report_for(face).unwrap();

    assert_eq!(report.container, m.entity("hold").unwrap());
    assert_eq!(report.container_label, "Definition: crate, Tag: Deck");
    assert_eq!(report.shape, Some(ShapeClass::Cube));
    assert_eq!(report.edge_lengths, vec![2; 4]);
    assert_intersection_labels(&report, &["Definition: ballast, Tag: Bilge"], "face walkup")
        .unwrap();
    assert_eq!(report.intersections[0].global, [2, 0, 0]);
    assert_eq!(report.intersections[0].local, [0, 0, 0]);
}

// ── Scenario 5: Loose selection ─────────────────────────────────────────

#[test]
fn test_loose_selection_has_no_assembly() {
    let mut m = SceneBuilder::new("loose");
    let stray = segment(&mut m.scene, None, Point3d::ORIGIN, Point3d::new(1., 0., 0.));

    let err = m.report_for(stray).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Analysis(AnalysisError::SelectionOutsideAssembly)
    ));
}
