use scene_types::{EntityId, EntityKind, Scene};
use tracing::{debug, instrument};

/// Whether the world-space bounding boxes of two entities overlap, with
/// touching boxes counting as overlap. Entities with no resolvable or no
/// finite bounds never intersect anything.
pub fn entities_intersect(scene: &Scene, a: EntityId, b: EntityId) -> bool {
    match (scene.entity_world_bounds(a), scene.entity_world_bounds(b)) {
        (Some(box_a), Some(box_b)) => box_a.intersects(&box_b),
        _ => false,
    }
}

/// Candidates whose bounds overlap the selected entity's, in candidate
/// order, de-duplicated. The selected entity itself and its own direct
/// children are excluded: structural containment is not spatial
/// intersection.
#[instrument(skip(scene, candidates), fields(candidates = candidates.len()))]
pub fn find_intersections(
    scene: &Scene,
    selected: EntityId,
    candidates: &[EntityId],
) -> Vec<EntityId> {
    let selected_definition = scene.entity(selected).and_then(|e| e.kind.definition());

    let mut hits: Vec<EntityId> = Vec::new();
    for &candidate in candidates {
        if candidate == selected || hits.contains(&candidate) {
            continue;
        }
        let Some(entity) = scene.entity(candidate) else {
            continue;
        };
        if entity.parent.is_some() && entity.parent == selected_definition {
            continue;
        }
        if entities_intersect(scene, selected, candidate) {
            hits.push(candidate);
        }
    }
    debug!(hits = hits.len(), "bounding box sweep finished");
    hits
}

/// The candidate pool the driver scans: groups among the root entities
/// first, then component instances, each in root order.
pub fn top_level_containers(scene: &Scene) -> Vec<EntityId> {
    let mut pool: Vec<EntityId> = scene
        .roots
        .iter()
        .copied()
        .filter(|&id| matches!(scene.entity(id), Some(e) if matches!(e.kind, EntityKind::Group { .. })))
        .collect();
    pool.extend(scene.roots.iter().copied().filter(
        |&id| matches!(scene.entity(id), Some(e) if matches!(e.kind, EntityKind::Instance { .. })),
    ));
    pool
}
