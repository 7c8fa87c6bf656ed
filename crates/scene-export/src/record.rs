use geom_kernel::Point3d;
use serde::{Deserialize, Serialize};

/// A point written out as named components rather than a bare array.
///
/// Positions and edge endpoints use this shape; face loops stay compact
/// `[x, y, z]` triples because consumers index them positionally.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Point3d> for ExportPoint {
    fn from(point: Point3d) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }
}

impl From<ExportPoint> for Point3d {
    fn from(point: ExportPoint) -> Self {
        Point3d::new(point.x, point.y, point.z)
    }
}

/// One exported entity. The `type` tag names the entity kind and the
/// remaining fields depend on it.
///
/// Containers carry the records of their definition's children, so a
/// nested assembly serializes as a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExportRecord {
    Face {
        points: Vec<[f64; 3]>,
        material: Option<String>,
    },
    Edge {
        start_point: ExportPoint,
        end_point: ExportPoint,
        length: f64,
    },
    Group {
        material: Option<String>,
        entities: Vec<ExportRecord>,
    },
    ComponentInstance {
        material: Option<String>,
        entities: Vec<ExportRecord>,
    },
    /// Vertices carry no payload of their own; their coordinates already
    /// appear through the edges and faces that reference them.
    Vertex,
}

impl ExportRecord {
    /// Child records for containers, empty for leaf geometry.
    pub fn entities(&self) -> &[ExportRecord] {
        match self {
            ExportRecord::Group { entities, .. } | ExportRecord::ComponentInstance { entities, .. } => entities,
            _ => &[],
        }
    }
}
