use geom_kernel::Point3d;
use scene_types::{EntityId, Scene};
use serde::Serialize;

use crate::errors::AnalysisError;

/// An entity's origin expressed twice: in world space and in the local
/// frame of some other entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub local: Point3d,
    pub global: Point3d,
}

impl Coordinates {
    /// Local triple truncated toward zero, the reporting convention.
    pub fn local_truncated(&self) -> [i64; 3] {
        self.local.truncated()
    }

    pub fn global_truncated(&self) -> [i64; 3] {
        self.global.truncated()
    }
}

/// Where `entity`'s origin sits globally and relative to `relative_to`'s
/// local axes.
///
/// `global` is the entity's world frame applied to the origin; `local`
/// runs the world frame through the inverse of `relative_to`'s frame
/// first. For two colliding assemblies this is the answer to "where is
/// one, seen from the other".
pub fn resolve_coordinates(
    scene: &Scene,
    entity: EntityId,
    relative_to: EntityId,
) -> Result<Coordinates, AnalysisError> {
    if scene.entity(entity).is_none() {
        return Err(AnalysisError::UnknownEntity { id: entity });
    }
    if scene.entity(relative_to).is_none() {
        return Err(AnalysisError::UnknownEntity { id: relative_to });
    }

    let entity_world = scene
        .world_transform(entity)
        .ok_or(AnalysisError::UnresolvedFrame { id: entity })?;
    let relative_world = scene
        .world_transform(relative_to)
        .ok_or(AnalysisError::UnresolvedFrame { id: relative_to })?;
    let into_relative = relative_world
        .inverse()
        .map_err(|_| AnalysisError::SingularFrame { id: relative_to })?;

    Ok(Coordinates {
        local: entity_world.then(&into_relative).transform_point(&Point3d::ORIGIN),
        global: entity_world.origin(),
    })
}
