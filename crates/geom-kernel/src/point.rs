use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::vector::Vec3;

/// A point in 3D model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3d {
    pub const ORIGIN: Point3d = Point3d { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Point3d) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn midpoint(&self, other: &Point3d) -> Point3d {
        Point3d::new(
            (self.x + other.x) * 0.5,
            (self.y + other.y) * 0.5,
            (self.z + other.z) * 0.5,
        )
    }

    /// Displacement from this point to `other`.
    pub fn vector_to(&self, other: &Point3d) -> Vec3 {
        Vec3::new(other.x - self.x, other.y - self.y, other.z - self.z)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Coordinates truncated toward zero to whole units, the convention for
    /// reporting positions and edge lengths as integers.
    pub fn truncated(&self) -> [i64; 3] {
        [self.x as i64, self.y as i64, self.z as i64]
    }
}

impl Add<Vec3> for Point3d {
    type Output = Point3d;

    fn add(self, v: Vec3) -> Point3d {
        Point3d::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub<Point3d> for Point3d {
    type Output = Vec3;

    fn sub(self, other: Point3d) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}
