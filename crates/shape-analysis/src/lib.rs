//! Geometry analysis over a scene snapshot: quadrilateral and cuboid
//! classification, bounding-volume intersection search, and relative
//! coordinate resolution, tied together by a one-shot driver.

pub mod classify;
pub mod errors;
pub mod intersect;
pub mod report;
pub mod resolve;

pub use classify::{
    classify, edge_lengths, edge_lengths_in, face_and_neighbors_are_squares, has_right_angles,
    is_square, representative_face, ShapeClass, RIGHT_ANGLE_TOLERANCE_DEG,
};
pub use errors::AnalysisError;
pub use intersect::{entities_intersect, find_intersections, top_level_containers};
pub use report::{analyze_selection, containing_assembly, entity_label, AnalysisReport, Intersection};
pub use resolve::{resolve_coordinates, Coordinates};
