use scene_types::EntityId;
use thiserror::Error;

/// Failures of the analysis pass. Recoverable "no shape determined"
/// outcomes are `None`/empty returns on the classifier side, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("entity {id:?} is not in the scene")]
    UnknownEntity { id: EntityId },
    /// The selection sits in the model root with no group or component
    /// instance around it. Callers treat this as invalid selection.
    #[error("selection is not inside any group or component instance")]
    SelectionOutsideAssembly,
    /// The entity's definition is never instanced, or its reference chain
    /// loops, so no world frame exists for it.
    #[error("no world frame can be resolved for entity {id:?}")]
    UnresolvedFrame { id: EntityId },
    #[error("world frame of entity {id:?} is singular and cannot anchor local coordinates")]
    SingularFrame { id: EntityId },
}
