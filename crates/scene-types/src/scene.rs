use geom_kernel::{BoundingBox, Point3d, Transform};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::{instrument, warn};

use crate::definition::Definition;
use crate::entity::{DefinitionId, EntityId, EntityKind, SceneEntity};

/// A model: arena-allocated entities and definitions plus the ordered list
/// of root entities. Definitions form a graph, since a definition's child
/// containers may reference other definitions; every traversal here guards
/// against reference cycles instead of assuming a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub entities: SlotMap<EntityId, SceneEntity>,
    pub definitions: SlotMap<DefinitionId, Definition>,
    pub roots: Vec<EntityId>,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entities: SlotMap::with_key(),
            definitions: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    // ─── Construction ────────────────────────────────────────────────────

    pub fn add_definition(&mut self, name: &str, description: &str) -> DefinitionId {
        self.definitions.insert_with_key(|id| Definition {
            id,
            name: name.to_string(),
            description: description.to_string(),
            entities: Vec::new(),
        })
    }

    /// Inserts an entity into the root collection (`parent` is `None`) or
    /// into a definition's child list.
    pub fn add_entity(&mut self, parent: Option<DefinitionId>, kind: EntityKind) -> EntityId {
        let id = self.entities.insert_with_key(|id| SceneEntity {
            id,
            kind,
            transform: Transform::identity(),
            tag: None,
            parent,
        });
        match parent {
            Some(def) => self.definitions[def].entities.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn add_vertex(&mut self, parent: Option<DefinitionId>, point: Point3d) -> EntityId {
        self.add_entity(parent, EntityKind::Vertex { point })
    }

    pub fn add_edge(
        &mut self,
        parent: Option<DefinitionId>,
        start: EntityId,
        end: EntityId,
    ) -> EntityId {
        self.add_entity(parent, EntityKind::Edge { start, end })
    }

    pub fn add_face(
        &mut self,
        parent: Option<DefinitionId>,
        boundary: Vec<EntityId>,
        material: Option<String>,
    ) -> EntityId {
        self.add_entity(parent, EntityKind::Face { boundary, material })
    }

    pub fn add_group(
        &mut self,
        parent: Option<DefinitionId>,
        definition: DefinitionId,
        transform: Transform,
    ) -> EntityId {
        let id = self.add_entity(
            parent,
            EntityKind::Group {
                definition,
                material: None,
            },
        );
        self.entities[id].transform = transform;
        id
    }

    pub fn add_instance(
        &mut self,
        parent: Option<DefinitionId>,
        definition: DefinitionId,
        transform: Transform,
    ) -> EntityId {
        let id = self.add_entity(
            parent,
            EntityKind::Instance {
                definition,
                material: None,
            },
        );
        self.entities[id].transform = transform;
        id
    }

    pub fn set_tag(&mut self, id: EntityId, tag: &str) {
        if let Some(entity) = self.entities.get_mut(id) {
            entity.tag = Some(tag.to_string());
        }
    }

    pub fn set_material(&mut self, id: EntityId, name: &str) {
        if let Some(entity) = self.entities.get_mut(id) {
            match &mut entity.kind {
                EntityKind::Face { material, .. }
                | EntityKind::Group { material, .. }
                | EntityKind::Instance { material, .. } => *material = Some(name.to_string()),
                _ => {}
            }
        }
    }

    // ─── Lookups ─────────────────────────────────────────────────────────

    pub fn entity(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(id)
    }

    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id)
    }

    /// Definition referenced by a group or instance.
    pub fn definition_of(&self, id: EntityId) -> Option<&Definition> {
        self.definitions.get(self.entities.get(id)?.kind.definition()?)
    }

    /// Child entities of a container's definition. Empty for leaf geometry:
    /// an empty traversal is an empty sequence, never an error.
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.definition_of(id)
            .map_or(&[], |d| d.entities.as_slice())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn vertex_point(&self, id: EntityId) -> Option<Point3d> {
        match &self.entities.get(id)?.kind {
            EntityKind::Vertex { point } => Some(*point),
            _ => None,
        }
    }

    pub fn edge_endpoints(&self, id: EntityId) -> Option<(Point3d, Point3d)> {
        match &self.entities.get(id)?.kind {
            EntityKind::Edge { start, end } => {
                Some((self.vertex_point(*start)?, self.vertex_point(*end)?))
            }
            _ => None,
        }
    }

    pub fn edge_length(&self, id: EntityId) -> Option<f64> {
        let (a, b) = self.edge_endpoints(id)?;
        Some(a.distance_to(&b))
    }

    /// Boundary corner positions of a face, in loop order. `None` if the
    /// entity is not a face or a boundary vertex is dangling.
    pub fn face_points(&self, id: EntityId) -> Option<Vec<Point3d>> {
        match &self.entities.get(id)?.kind {
            EntityKind::Face { boundary, .. } => {
                boundary.iter().map(|v| self.vertex_point(*v)).collect()
            }
            _ => None,
        }
    }

    // ─── Adjacency ───────────────────────────────────────────────────────

    /// The entities sharing a collection with `id`, including `id` itself.
    pub fn siblings_of(&self, id: EntityId) -> &[EntityId] {
        let Some(entity) = self.entities.get(id) else {
            return &[];
        };
        match entity.parent {
            Some(def) => self
                .definitions
                .get(def)
                .map_or(&[], |d| d.entities.as_slice()),
            None => &self.roots,
        }
    }

    /// Faces in the same collection whose boundary runs along the edge.
    pub fn faces_using_edge(&self, edge: EntityId) -> Vec<EntityId> {
        let Some(SceneEntity {
            kind: EntityKind::Edge { start, end },
            ..
        }) = self.entities.get(edge)
        else {
            return Vec::new();
        };
        let (a, b) = (*start, *end);
        self.siblings_of(edge)
            .iter()
            .copied()
            .filter(|&id| match &self.entities[id].kind {
                EntityKind::Face { boundary, .. } => boundary_has_segment(boundary, a, b),
                _ => false,
            })
            .collect()
    }

    /// Edge entities bounding a face, in boundary loop order. Segments with
    /// no matching edge entity are skipped.
    pub fn edges_of_face(&self, face: EntityId) -> Vec<EntityId> {
        let Some(SceneEntity {
            kind: EntityKind::Face { boundary, .. },
            ..
        }) = self.entities.get(face)
        else {
            return Vec::new();
        };
        let siblings = self.siblings_of(face);
        let n = boundary.len();
        let mut out = Vec::new();
        for i in 0..n {
            let a = boundary[i];
            let b = boundary[(i + 1) % n];
            let segment = siblings.iter().copied().find(|&id| {
                matches!(
                    &self.entities[id].kind,
                    EntityKind::Edge { start, end }
                        if (*start == a && *end == b) || (*start == b && *end == a)
                )
            });
            if let Some(edge) = segment {
                out.push(edge);
            }
        }
        out
    }

    /// Edges in the same collection touching the vertex.
    pub fn edges_using_vertex(&self, vertex: EntityId) -> Vec<EntityId> {
        self.siblings_of(vertex)
            .iter()
            .copied()
            .filter(|&id| match &self.entities[id].kind {
                EntityKind::Edge { start, end } => *start == vertex || *end == vertex,
                _ => false,
            })
            .collect()
    }

    /// First group or instance referencing `def`, in arena order.
    pub fn first_instance_of(&self, def: DefinitionId) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, e)| e.kind.definition() == Some(def))
            .map(|(id, _)| id)
    }

    // ─── Frames ──────────────────────────────────────────────────────────

    /// Frame mapping the entity's own coordinate space to world space.
    ///
    /// For a group or instance this includes the entity's own placement;
    /// for leaf geometry it is the frame of the enclosing collection.
    /// Yields `None` for unknown ids, for geometry inside a definition
    /// that is never instanced, and for definition reference cycles.
    pub fn world_transform(&self, id: EntityId) -> Option<Transform> {
        let entity = self.entities.get(id)?;
        let own = if entity.kind.is_container() {
            entity.transform
        } else {
            Transform::identity()
        };
        Some(own.then(&self.enclosing_frame(entity)?))
    }

    /// Frame of the collection holding `entity`, following the chain of
    /// host instances up to the model root. Where a definition has several
    /// instances the first in arena order stands in as the host.
    fn enclosing_frame(&self, entity: &SceneEntity) -> Option<Transform> {
        let mut frame = Transform::identity();
        let mut parent = entity.parent;
        let mut visited: Vec<DefinitionId> = Vec::new();
        while let Some(def_id) = parent {
            if visited.contains(&def_id) {
                warn!(?def_id, "definition cycle while resolving frame");
                return None;
            }
            visited.push(def_id);
            let host = self.entities.get(self.first_instance_of(def_id)?)?;
            frame = frame.then(&host.transform);
            parent = host.parent;
        }
        Some(frame)
    }

    // ─── Bounds ──────────────────────────────────────────────────────────

    /// World-space bounding box of one entity. Containers are expanded
    /// through their definitions, so the box covers every leaf reachable
    /// from the entity.
    pub fn entity_world_bounds(&self, id: EntityId) -> Option<BoundingBox> {
        let entity = self.entities.get(id)?;
        let frame = self.enclosing_frame(entity)?;
        let mut bounds = BoundingBox::empty();
        let mut path = Vec::new();
        self.accumulate_bounds(entity, &frame, &mut bounds, &mut path);
        Some(bounds)
    }

    /// World-space bounding box of everything reachable from the roots.
    #[instrument(skip(self), fields(scene = %self.name))]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bounds = BoundingBox::empty();
        let mut path = Vec::new();
        let identity = Transform::identity();
        for id in &self.roots {
            if let Some(entity) = self.entities.get(*id) {
                self.accumulate_bounds(entity, &identity, &mut bounds, &mut path);
            }
        }
        bounds
    }

    fn accumulate_bounds(
        &self,
        entity: &SceneEntity,
        frame: &Transform,
        bounds: &mut BoundingBox,
        path: &mut Vec<DefinitionId>,
    ) {
        match &entity.kind {
            EntityKind::Vertex { point } => {
                bounds.expand_to_include(&frame.transform_point(point));
            }
            EntityKind::Edge { start, end } => {
                for v in [*start, *end] {
                    if let Some(p) = self.vertex_point(v) {
                        bounds.expand_to_include(&frame.transform_point(&p));
                    }
                }
            }
            EntityKind::Face { boundary, .. } => {
                for v in boundary {
                    if let Some(p) = self.vertex_point(*v) {
                        bounds.expand_to_include(&frame.transform_point(&p));
                    }
                }
            }
            EntityKind::Group { definition, .. } | EntityKind::Instance { definition, .. } => {
                let def_id = *definition;
                if path.contains(&def_id) {
                    warn!(?def_id, "skipping cyclic definition reference");
                    return;
                }
                let Some(def) = self.definitions.get(def_id) else {
                    warn!(?def_id, "skipping dangling definition reference");
                    return;
                };
                path.push(def_id);
                let inner = entity.transform.then(frame);
                for child_id in &def.entities {
                    if let Some(child) = self.entities.get(*child_id) {
                        self.accumulate_bounds(child, &inner, bounds, path);
                    }
                }
                path.pop();
            }
        }
    }
}

/// True when two vertices appear as consecutive corners of the loop, in
/// either direction.
fn boundary_has_segment(boundary: &[EntityId], a: EntityId, b: EntityId) -> bool {
    let n = boundary.len();
    (0..n).any(|i| {
        let u = boundary[i];
        let v = boundary[(i + 1) % n];
        (u == a && v == b) || (u == b && v == a)
    })
}
