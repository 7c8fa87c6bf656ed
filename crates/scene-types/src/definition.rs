use serde::{Deserialize, Serialize};

use crate::entity::{DefinitionId, EntityId};

/// Geometry shared by every group or instance that references it. Child
/// order is insertion order, which traversal and reporting preserve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub id: DefinitionId,
    pub name: String,
    pub description: String,
    pub entities: Vec<EntityId>,
}
