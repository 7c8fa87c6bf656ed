//! Scalar geometry for scene analysis: points, vectors, affine transforms,
//! and axis-aligned bounding boxes, with explicit errors on degenerate
//! inputs instead of silently coerced results.

pub mod bounds;
pub mod point;
pub mod transform;
pub mod vector;

pub use bounds::BoundingBox;
pub use point::Point3d;
pub use transform::Transform;
pub use vector::Vec3;

use thiserror::Error;

/// Errors raised by kernel math on degenerate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KernelError {
    #[error("degenerate vector (length {length:.3e}) has no direction")]
    DegenerateVector { length: f64 },
    #[error("singular transform cannot be inverted")]
    SingularTransform,
}

/// Tolerances for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are coincident (model units).
    pub coincidence: f64,
    /// Angles smaller than this are zero (radians).
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-7,
            angular: 1e-10,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3d, b: &Point3d) -> bool {
        a.distance_to(b) < self.coincidence
    }

    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }

    pub fn is_zero_angle(&self, angle: f64) -> bool {
        angle.abs() < self.angular
    }
}

/// The tolerance used when a caller does not supply one.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
