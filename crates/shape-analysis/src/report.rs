use scene_types::{EntityId, Scene};
use serde::Serialize;
use tracing::{info, instrument};

use crate::classify::{classify, edge_lengths, ShapeClass};
use crate::errors::AnalysisError;
use crate::intersect::{find_intersections, top_level_containers};
use crate::resolve::resolve_coordinates;

/// Human-readable identifier in the form
/// `Definition: {name}, Tag: {tag}`. Both halves are empty strings when
/// the entity has no definition or no tag.
pub fn entity_label(scene: &Scene, id: EntityId) -> String {
    let (name, tag) = match scene.entity(id) {
        Some(entity) => (
            scene
                .definition_of(id)
                .map(|d| d.name.clone())
                .unwrap_or_default(),
            entity.tag.clone().unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };
    format!("Definition: {name}, Tag: {tag}")
}

/// The assembly a selection belongs to: the entity itself when it is a
/// group or instance, otherwise the nearest container that places the
/// entity's collection.
pub fn containing_assembly(scene: &Scene, id: EntityId) -> Result<EntityId, AnalysisError> {
    let entity = scene
        .entity(id)
        .ok_or(AnalysisError::UnknownEntity { id })?;
    if entity.kind.is_container() {
        return Ok(id);
    }
    let definition = entity
        .parent
        .ok_or(AnalysisError::SelectionOutsideAssembly)?;
    scene
        .first_instance_of(definition)
        .ok_or(AnalysisError::SelectionOutsideAssembly)
}

/// One overlapping assembly, with the selected assembly's origin given in
/// world space and in the overlapping assembly's local frame. Triples are
/// truncated toward zero for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intersection {
    pub entity: EntityId,
    pub label: String,
    pub local: [i64; 3],
    pub global: [i64; 3],
}

/// Everything one analysis pass produces; the caller renders it to the
/// console or discards it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub selected: EntityId,
    /// `None` when no four-sided face stood in for the selection.
    pub shape: Option<ShapeClass>,
    pub edge_lengths: Vec<i64>,
    pub container: EntityId,
    pub container_label: String,
    pub intersections: Vec<Intersection>,
}

/// One-shot analysis of a selection: classification, edge-length
/// aggregation, the ancestor walk, the intersection sweep over top-level
/// containers, and per-hit coordinate resolution.
#[instrument(skip(scene), fields(scene = %scene.name, entities = scene.entity_count()))]
pub fn analyze_selection(
    scene: &Scene,
    selected: EntityId,
) -> Result<AnalysisReport, AnalysisError> {
    if scene.entity(selected).is_none() {
        return Err(AnalysisError::UnknownEntity { id: selected });
    }

    let shape = classify(scene, selected);
    let lengths = edge_lengths(scene, selected);
    info!(?shape, edge_count = lengths.len(), "classified selection");

    let container = containing_assembly(scene, selected)?;
    let container_label = entity_label(scene, container);

    let candidates = top_level_containers(scene);
    let hits = find_intersections(scene, container, &candidates);

    let mut intersections = Vec::with_capacity(hits.len());
    for hit in hits {
        let coords = resolve_coordinates(scene, container, hit)?;
        intersections.push(Intersection {
            entity: hit,
            label: entity_label(scene, hit),
            local: coords.local_truncated(),
            global: coords.global_truncated(),
        });
    }
    info!(
        container = %container_label,
        intersections = intersections.len(),
        "analysis pass complete"
    );

    Ok(AnalysisReport {
        selected,
        shape,
        edge_lengths: lengths,
        container,
        container_label,
        intersections,
    })
}
