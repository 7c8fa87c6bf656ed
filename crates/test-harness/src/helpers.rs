//! Helper functions: error types and reusable geometry builders.

use geom_kernel::{Point3d, Vec3};
use scene_types::{DefinitionId, EntityId, Scene};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("entity not found: {name}")]
    EntityNotFound { name: String },

    #[error("definition not found: {name}")]
    DefinitionNotFound { name: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("analysis error: {0}")]
    Analysis(#[from] shape_analysis::AnalysisError),

    #[error("export error: {0}")]
    Export(#[from] scene_export::ExportError),
}

// ── Geometry Builders ───────────────────────────────────────────────────────

/// Corner quads of an axis-aligned box, as indices into its corner array.
const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3], // bottom
    [4, 5, 6, 7], // top
    [0, 1, 5, 4],
    [1, 2, 6, 5],
    [2, 3, 7, 6],
    [3, 0, 4, 7],
];

/// Build a free-standing edge between two new vertices.
pub fn segment(
    scene: &mut Scene,
    parent: Option<DefinitionId>,
    start: Point3d,
    end: Point3d,
) -> EntityId {
    let a = scene.add_vertex(parent, start);
    let b = scene.add_vertex(parent, end);
    scene.add_edge(parent, a, b)
}

/// Build a four-cornered face with its boundary edges.
///
/// Corners are taken in loop order. Returns the face and its edges.
pub fn quad_face(
    scene: &mut Scene,
    parent: Option<DefinitionId>,
    corners: [Point3d; 4],
) -> (EntityId, [EntityId; 4]) {
    let vs = corners.map(|p| scene.add_vertex(parent, p));
    let edges = [
        scene.add_edge(parent, vs[0], vs[1]),
        scene.add_edge(parent, vs[1], vs[2]),
        scene.add_edge(parent, vs[2], vs[3]),
        scene.add_edge(parent, vs[3], vs[0]),
    ];
    let face = scene.add_face(parent, vs.to_vec(), None);
    (face, edges)
}

/// Build an axis-aligned rectangle in the XY plane at `origin`.
pub fn rect_face(
    scene: &mut Scene,
    parent: Option<DefinitionId>,
    origin: Point3d,
    width: f64,
    height: f64,
) -> (EntityId, [EntityId; 4]) {
    quad_face(
        scene,
        parent,
        [
            origin,
            origin + Vec3::new(width, 0.0, 0.0),
            origin + Vec3::new(width, height, 0.0),
            origin + Vec3::new(0.0, height, 0.0),
        ],
    )
}

/// Build a closed polygonal face over the given corners, edges included.
pub fn polygon_face(
    scene: &mut Scene,
    parent: Option<DefinitionId>,
    corners: &[Point3d],
) -> EntityId {
    let vs: Vec<EntityId> = corners
        .iter()
        .map(|p| scene.add_vertex(parent, *p))
        .collect();
    for i in 0..vs.len() {
        scene.add_edge(parent, vs[i], vs[(i + 1) % vs.len()]);
    }
    scene.add_face(parent, vs, None)
}

/// Fill a definition with a complete axis-aligned box: eight vertices,
/// twelve edges, six quad faces. One corner sits at the definition origin.
///
/// Returns the faces, bottom and top first.
pub fn box_geometry(
    scene: &mut Scene,
    parent: DefinitionId,
    width: f64,
    depth: f64,
    height: f64,
) -> [EntityId; 6] {
    let corners = [
        Point3d::new(0.0, 0.0, 0.0),
        Point3d::new(width, 0.0, 0.0),
        Point3d::new(width, depth, 0.0),
        Point3d::new(0.0, depth, 0.0),
        Point3d::new(0.0, 0.0, height),
        Point3d::new(width, 0.0, height),
        Point3d::new(width, depth, height),
        Point3d::new(0.0, depth, height),
    ];
    let vs = corners.map(|p| scene.add_vertex(Some(parent), p));

    let mut seen: Vec<(usize, usize)> = Vec::new();
    for quad in BOX_FACES {
        for i in 0..4 {
            let (a, b) = (quad[i], quad[(i + 1) % 4]);
            let key = (a.min(b), a.max(b));
            if !seen.contains(&key) {
                seen.push(key);
                scene.add_edge(Some(parent), vs[a], vs[b]);
            }
        }
    }

    BOX_FACES.map(|quad| scene.add_face(Some(parent), quad.map(|i| vs[i]).to_vec(), None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_geometry_has_full_topology() {
        let mut scene = Scene::new("box");
        let def = scene.add_definition("box", "");
        let faces = box_geometry(&mut scene, def, 2.0, 3.0, 4.0);

        // 8 vertices + 12 edges + 6 faces
        assert_eq!(scene.definition(def).unwrap().entities.len(), 26);
        for face in faces {
            assert_eq!(scene.edges_of_face(face).len(), 4);
        }
    }
}
