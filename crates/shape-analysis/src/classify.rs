use geom_kernel::Vec3;
use scene_types::{EntityId, EntityKind, Scene};
use serde::{Deserialize, Serialize};

/// How far an interior angle may sit from 90 degrees and still count as
/// right. The edge-length test below deliberately uses exact equality
/// instead; the two tests are not meant to share a tolerance.
pub const RIGHT_ANGLE_TOLERANCE_DEG: f64 = 1.0;

/// Verdict over a selection: right angles everywhere and one edge length
/// (cube), right angles with mixed lengths (cuboid), or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeClass {
    Cube,
    Cuboid,
    Irregular,
}

/// The face that stands in for an entity in angle checks: a face itself,
/// an edge's first adjacent face, or the first face reachable through a
/// vertex's edges.
pub fn representative_face(scene: &Scene, id: EntityId) -> Option<EntityId> {
    let entity = scene.entity(id)?;
    match &entity.kind {
        EntityKind::Face { .. } => Some(id),
        EntityKind::Edge { .. } => scene.faces_using_edge(id).into_iter().next(),
        EntityKind::Vertex { .. } => scene
            .edges_using_vertex(id)
            .into_iter()
            .flat_map(|edge| scene.faces_using_edge(edge))
            .next(),
        _ => None,
    }
}

/// Whether the entity's representative face is a right-angled
/// quadrilateral.
///
/// `None` when no representative face exists, when the face is not
/// four-sided, or when a collapsed corner makes an angle undefined. A
/// degenerate corner is never reported as a right angle.
pub fn has_right_angles(scene: &Scene, id: EntityId) -> Option<bool> {
    let face = representative_face(scene, id)?;
    let points = scene.face_points(face)?;
    if points.len() != 4 {
        return None;
    }

    let corner_vectors: Vec<Vec3> = (0..4)
        .map(|i| points[i].vector_to(&points[(i + 1) % 4]))
        .collect();

    let mut all_right = true;
    for i in 0..4 {
        let angle = corner_vectors[i].angle_to(&corner_vectors[(i + 1) % 4]).ok()?;
        if (90.0 - angle.to_degrees()).abs() >= RIGHT_ANGLE_TOLERANCE_DEG {
            all_right = false;
        }
    }
    Some(all_right)
}

/// Whether a face is a four-sided polygon with all edge lengths exactly
/// equal. No tolerance on purpose: the comparison buckets computed lengths
/// as-is, unlike the angle test above.
pub fn is_square(scene: &Scene, face: EntityId) -> bool {
    let Some(points) = scene.face_points(face) else {
        return false;
    };
    if points.len() != 4 {
        return false;
    }
    let lengths: Vec<f64> = (0..4)
        .map(|i| points[i].vector_to(&points[(i + 1) % 4]).length())
        .collect();
    lengths.iter().all(|l| *l == lengths[0])
}

/// Whether the face and every face sharing an edge with it are squares.
pub fn face_and_neighbors_are_squares(scene: &Scene, face: EntityId) -> bool {
    if !is_square(scene, face) {
        return false;
    }
    let mut neighbors: Vec<EntityId> = Vec::new();
    for edge in scene.edges_of_face(face) {
        for other in scene.faces_using_edge(edge) {
            if other != face && !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
    }
    neighbors.into_iter().all(|f| is_square(scene, f))
}

/// Edge lengths truncated to whole units, gathered per entity kind: a
/// container yields every edge in its definition, a face its boundary
/// edges, an edge itself, anything else nothing.
pub fn edge_lengths(scene: &Scene, id: EntityId) -> Vec<i64> {
    let Some(entity) = scene.entity(id) else {
        return Vec::new();
    };
    match &entity.kind {
        EntityKind::Group { .. } | EntityKind::Instance { .. } => {
            edge_lengths_in(scene, scene.children(id))
        }
        EntityKind::Face { .. } => scene
            .edges_of_face(id)
            .into_iter()
            .filter_map(|e| scene.edge_length(e))
            .map(|l| l as i64)
            .collect(),
        EntityKind::Edge { .. } => scene
            .edge_length(id)
            .map(|l| l as i64)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

/// Truncated lengths of the edge entities in a raw collection, in order.
pub fn edge_lengths_in(scene: &Scene, ids: &[EntityId]) -> Vec<i64> {
    ids.iter()
        .filter_map(|&id| {
            let entity = scene.entity(id)?;
            if matches!(entity.kind, EntityKind::Edge { .. }) {
                scene.edge_length(id).map(|l| l as i64)
            } else {
                None
            }
        })
        .collect()
}

/// Full verdict for a selection. `None` when no four-sided face stands in
/// for the entity.
pub fn classify(scene: &Scene, id: EntityId) -> Option<ShapeClass> {
    let right_angles = has_right_angles(scene, id)?;
    let lengths = edge_lengths(scene, id);
    let mut unique = lengths;
    unique.sort_unstable();
    unique.dedup();

    Some(if right_angles && unique.len() == 1 {
        ShapeClass::Cube
    } else if right_angles {
        ShapeClass::Cuboid
    } else {
        ShapeClass::Irregular
    })
}
