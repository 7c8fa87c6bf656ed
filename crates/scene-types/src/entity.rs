use geom_kernel::{Point3d, Transform};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

// ─── Keys ────────────────────────────────────────────────────────────────

new_key_type! {
    /// Stable handle to an entity in a [`Scene`](crate::Scene) arena.
    pub struct EntityId;
}

new_key_type! {
    /// Stable handle to a shared definition in a [`Scene`](crate::Scene).
    pub struct DefinitionId;
}

// ─── Entities ────────────────────────────────────────────────────────────

/// The closed set of things a scene can hold. Leaf geometry references
/// vertices by id so that faces and edges share corners, which is what
/// makes edge and vertex adjacency queries possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityKind {
    Vertex {
        point: Point3d,
    },
    Edge {
        start: EntityId,
        end: EntityId,
    },
    Face {
        /// Corner vertices in loop order; the last connects back to the first.
        boundary: Vec<EntityId>,
        material: Option<String>,
    },
    /// A container with a private definition.
    Group {
        definition: DefinitionId,
        material: Option<String>,
    },
    /// A placement of a definition that may be shared with other instances.
    Instance {
        definition: DefinitionId,
        material: Option<String>,
    },
}

impl EntityKind {
    /// The referenced definition, when the entity is a group or instance.
    pub fn definition(&self) -> Option<DefinitionId> {
        match self {
            EntityKind::Group { definition, .. } | EntityKind::Instance { definition, .. } => {
                Some(*definition)
            }
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.definition().is_some()
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            EntityKind::Vertex { .. } => "Vertex",
            EntityKind::Edge { .. } => "Edge",
            EntityKind::Face { .. } => "Face",
            EntityKind::Group { .. } => "Group",
            EntityKind::Instance { .. } => "ComponentInstance",
        }
    }
}

/// One entity in the scene arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Placement relative to the enclosing collection. Identity for leaf
    /// geometry, whose coordinates live directly in the collection's space.
    pub transform: Transform,
    /// Organizational tag, when one was assigned.
    pub tag: Option<String>,
    /// The definition whose child list owns this entity; `None` at the
    /// model root.
    pub parent: Option<DefinitionId>,
}
