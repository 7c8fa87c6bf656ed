//! Rich assertion helpers with diagnostic output.
//!
//! Every failure names its context and shows expected vs actual, so a
//! scenario that trips half way through reads like a report.

use scene_export::ModelDocument;
use scene_types::{EntityId, Scene};
use shape_analysis::{AnalysisReport, ShapeClass};

use crate::helpers::HarnessError;

/// Assert an entity's world-space bounding box within tolerance.
pub fn assert_world_bounds(
    scene: &Scene,
    id: EntityId,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bounds = scene
        .entity_world_bounds(id)
        .ok_or_else(|| HarnessError::AssertionFailed {
            detail: format!("[{ctx}] entity has no resolvable bounds"),
        })?;
    let actual_min = [bounds.min.x, bounds.min.y, bounds.min.z];
    let actual_max = [bounds.max.x, bounds.max.y, bounds.max.z];

    for i in 0..3 {
        if (actual_min[i] - expected_min[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounds min[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected_min[i], actual_min[i], tol,
                ),
            });
        }
        if (actual_max[i] - expected_max[i]).abs() > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{}] bounds max[{}]: expected {:.3}, got {:.3} (tol={})",
                    ctx, i, expected_max[i], actual_max[i], tol,
                ),
            });
        }
    }
    Ok(())
}

/// Assert the classifier's verdict for an entity, `None` meaning the
/// entity has no classifiable face.
pub fn assert_classification(
    scene: &Scene,
    id: EntityId,
    expected: Option<ShapeClass>,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = shape_analysis::classify(scene, id);
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] expected {expected:?}, got {actual:?}"),
        })
    }
}

/// Assert a report's intersection labels match, in order.
pub fn assert_intersection_labels(
    report: &AnalysisReport,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual: Vec<&str> = report
        .intersections
        .iter()
        .map(|hit| hit.label.as_str())
        .collect();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] expected intersections {expected:?}, got {actual:?}"),
        })
    }
}

/// Assert a document's top-level object names match, in order.
pub fn assert_document_objects(
    document: &ModelDocument,
    expected: &[&str],
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual: Vec<&str> = document
        .entities
        .iter()
        .map(|object| object.name.as_str())
        .collect();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] expected objects {expected:?}, got {actual:?}"),
        })
    }
}
