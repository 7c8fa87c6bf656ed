use scene_types::{DefinitionId, EntityId, EntityKind, Scene};
use tracing::{info, instrument};

use crate::document::{ModelDocument, ObjectRecord};
use crate::errors::ExportError;
use crate::record::ExportRecord;

// ─── Budget ──────────────────────────────────────────────────────────────

/// Budget for one export traversal.
///
/// Shared definitions make the serialized tree larger than the scene
/// itself, so deeply nested or heavily instanced models can blow up the
/// output. The budget turns that into an error instead of an unbounded
/// allocation. Cycles are rejected separately regardless of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalLimits {
    /// Deepest allowed container nesting.
    pub max_depth: usize,
    /// Most records a single export may produce.
    pub max_nodes: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 100_000,
        }
    }
}

impl TraversalLimits {
    /// No practical budget. Cycle detection still applies.
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
            max_nodes: usize::MAX,
        }
    }
}

// ─── Traversal ───────────────────────────────────────────────────────────

struct Traversal<'a> {
    scene: &'a Scene,
    limits: TraversalLimits,
    produced: usize,
    path: Vec<DefinitionId>,
}

impl<'a> Traversal<'a> {
    fn new(scene: &'a Scene, limits: TraversalLimits) -> Self {
        Self {
            scene,
            limits,
            produced: 0,
            path: Vec::new(),
        }
    }

    fn record(&mut self, id: EntityId, depth: usize) -> Result<ExportRecord, ExportError> {
        if depth > self.limits.max_depth {
            return Err(ExportError::BudgetExceeded {
                limit: self.limits.max_depth,
            });
        }
        self.produced += 1;
        if self.produced > self.limits.max_nodes {
            return Err(ExportError::BudgetExceeded {
                limit: self.limits.max_nodes,
            });
        }

        let entity = self.scene.entity(id).ok_or(ExportError::DanglingReference)?;
        Ok(match &entity.kind {
            EntityKind::Vertex { .. } => ExportRecord::Vertex,
            EntityKind::Edge { .. } => {
                let (start, end) = self
                    .scene
                    .edge_endpoints(id)
                    .ok_or(ExportError::DanglingReference)?;
                ExportRecord::Edge {
                    start_point: start.into(),
                    end_point: end.into(),
                    length: start.distance_to(&end),
                }
            }
            EntityKind::Face { material, .. } => {
                let points = self
                    .scene
                    .face_points(id)
                    .ok_or(ExportError::DanglingReference)?;
                ExportRecord::Face {
                    points: points.iter().map(|p| p.to_array()).collect(),
                    material: material.clone(),
                }
            }
            EntityKind::Group {
                definition,
                material,
            } => ExportRecord::Group {
                material: material.clone(),
                entities: self.definition_records(*definition, depth)?,
            },
            EntityKind::Instance {
                definition,
                material,
            } => ExportRecord::ComponentInstance {
                material: material.clone(),
                entities: self.definition_records(*definition, depth)?,
            },
        })
    }

    fn definition_records(
        &mut self,
        def: DefinitionId,
        depth: usize,
    ) -> Result<Vec<ExportRecord>, ExportError> {
        if self.path.contains(&def) {
            let definition = self
                .scene
                .definition(def)
                .map(|d| d.name.clone())
                .unwrap_or_default();
            return Err(ExportError::DefinitionCycle { definition });
        }
        let definition = self
            .scene
            .definition(def)
            .ok_or(ExportError::DanglingReference)?;

        self.path.push(def);
        let mut records = Vec::with_capacity(definition.entities.len());
        for &child in &definition.entities {
            records.push(self.record(child, depth + 1)?);
        }
        self.path.pop();
        Ok(records)
    }
}

// ─── Entry points ────────────────────────────────────────────────────────

/// Serializes one entity and, for containers, everything beneath it.
pub fn serialize_entity(scene: &Scene, id: EntityId) -> Result<ExportRecord, ExportError> {
    serialize_entity_with(scene, id, TraversalLimits::default())
}

/// [`serialize_entity`] with an explicit traversal budget.
pub fn serialize_entity_with(
    scene: &Scene,
    id: EntityId,
    limits: TraversalLimits,
) -> Result<ExportRecord, ExportError> {
    Traversal::new(scene, limits).record(id, 0)
}

/// Records for the children of a container's definition.
///
/// Leaf geometry and containers over empty definitions yield an empty
/// vector rather than an error.
pub fn extract_children(scene: &Scene, id: EntityId) -> Result<Vec<ExportRecord>, ExportError> {
    extract_children_with(scene, id, TraversalLimits::default())
}

/// [`extract_children`] with an explicit traversal budget.
pub fn extract_children_with(
    scene: &Scene,
    id: EntityId,
    limits: TraversalLimits,
) -> Result<Vec<ExportRecord>, ExportError> {
    let entity = scene.entity(id).ok_or(ExportError::DanglingReference)?;
    match entity.kind.definition() {
        Some(def) => Traversal::new(scene, limits).definition_records(def, 0),
        None => Ok(Vec::new()),
    }
}

/// One object record per top-level group or instance, in root order.
///
/// Loose edges, faces, and vertices at the root are not objects and are
/// skipped. All objects draw from a single budget.
#[instrument(skip(scene), fields(scene = %scene.name))]
pub fn extract_model_objects_with(
    scene: &Scene,
    limits: TraversalLimits,
) -> Result<Vec<ObjectRecord>, ExportError> {
    let mut traversal = Traversal::new(scene, limits);
    let mut objects = Vec::new();
    for &id in &scene.roots {
        let Some(entity) = scene.entity(id) else {
            continue;
        };
        let Some(def_id) = entity.kind.definition() else {
            continue;
        };
        let definition = scene
            .definition(def_id)
            .ok_or(ExportError::DanglingReference)?;
        let origin = entity.transform.origin();
        objects.push(ObjectRecord {
            name: definition.name.clone(),
            description: definition.description.clone(),
            exact_position: origin.to_array(),
            position: origin.into(),
            entities: traversal.definition_records(def_id, 0)?,
        });
    }
    info!(
        objects = objects.len(),
        records = traversal.produced,
        "model objects assembled"
    );
    Ok(objects)
}

/// [`extract_model_objects_with`] under the default budget.
pub fn extract_model_objects(scene: &Scene) -> Result<Vec<ObjectRecord>, ExportError> {
    extract_model_objects_with(scene, TraversalLimits::default())
}

/// Exports the whole scene as a document.
pub fn export_model(scene: &Scene) -> Result<ModelDocument, ExportError> {
    export_model_with(scene, TraversalLimits::default())
}

/// [`export_model`] with an explicit traversal budget.
pub fn export_model_with(
    scene: &Scene,
    limits: TraversalLimits,
) -> Result<ModelDocument, ExportError> {
    Ok(ModelDocument {
        model_name: scene.name.clone(),
        entities: extract_model_objects_with(scene, limits)?,
    })
}
