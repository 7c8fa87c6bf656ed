//! Scene-graph data model: arena-allocated entities, shared definitions,
//! and the traversals (frames, bounds, adjacency) the analysis layers are
//! built on.

pub mod definition;
pub mod entity;
pub mod scene;

pub use definition::Definition;
pub use entity::{DefinitionId, EntityId, EntityKind, SceneEntity};
pub use scene::Scene;
