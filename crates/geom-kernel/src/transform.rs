use serde::{Deserialize, Serialize};

use crate::point::Point3d;
use crate::KernelError;

/// An affine transform: rotation, scaling, and translation composed into a
/// 4x4 matrix. Stored column-major; the bottom row is always `0 0 0 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        let mut m = [0.0; 16];
        m[0] = 1.0;
        m[5] = 1.0;
        m[10] = 1.0;
        m[15] = 1.0;
        Self { m }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut t = Self::identity();
        t.m[12] = x;
        t.m[13] = y;
        t.m[14] = z;
        t
    }

    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        let mut t = Self::identity();
        t.m[0] = sx;
        t.m[5] = sy;
        t.m[10] = sz;
        t
    }

    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut t = Self::identity();
        t.m[5] = c;
        t.m[6] = s;
        t.m[9] = -s;
        t.m[10] = c;
        t
    }

    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut t = Self::identity();
        t.m[0] = c;
        t.m[2] = -s;
        t.m[8] = s;
        t.m[10] = c;
        t
    }

    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut t = Self::identity();
        t.m[0] = c;
        t.m[1] = s;
        t.m[4] = -s;
        t.m[5] = c;
        t
    }

    /// Matrix entry at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// The image of the local origin, i.e. the translation component.
    pub fn origin(&self) -> Point3d {
        Point3d::new(self.m[12], self.m[13], self.m[14])
    }

    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        Point3d::new(
            self.m[0] * p.x + self.m[4] * p.y + self.m[8] * p.z + self.m[12],
            self.m[1] * p.x + self.m[5] * p.y + self.m[9] * p.z + self.m[13],
            self.m[2] * p.x + self.m[6] * p.y + self.m[10] * p.z + self.m[14],
        )
    }

    /// Composition that applies `self` first, then `next`.
    pub fn then(&self, next: &Transform) -> Transform {
        let a = &next.m;
        let b = &self.m;
        let mut m = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += a[k * 4 + row] * b[col * 4 + k];
                }
                m[col * 4 + row] = acc;
            }
        }
        Transform { m }
    }

    /// Inverse of the transform.
    ///
    /// Because the matrix is affine, the inverse is the inverted 3x3 linear
    /// block plus a back-transformed translation. Fails when the linear
    /// block is singular (e.g. a zero scale factor).
    pub fn inverse(&self) -> Result<Transform, KernelError> {
        let a00 = self.at(0, 0);
        let a01 = self.at(0, 1);
        let a02 = self.at(0, 2);
        let a10 = self.at(1, 0);
        let a11 = self.at(1, 1);
        let a12 = self.at(1, 2);
        let a20 = self.at(2, 0);
        let a21 = self.at(2, 1);
        let a22 = self.at(2, 2);

        let c00 = a11 * a22 - a12 * a21;
        let c01 = a12 * a20 - a10 * a22;
        let c02 = a10 * a21 - a11 * a20;

        let det = a00 * c00 + a01 * c01 + a02 * c02;
        if det.abs() < 1e-12 {
            return Err(KernelError::SingularTransform);
        }
        let inv = 1.0 / det;

        let i00 = c00 * inv;
        let i01 = (a02 * a21 - a01 * a22) * inv;
        let i02 = (a01 * a12 - a02 * a11) * inv;
        let i10 = c01 * inv;
        let i11 = (a00 * a22 - a02 * a20) * inv;
        let i12 = (a02 * a10 - a00 * a12) * inv;
        let i20 = c02 * inv;
        let i21 = (a01 * a20 - a00 * a21) * inv;
        let i22 = (a00 * a11 - a01 * a10) * inv;

        let tx = self.m[12];
        let ty = self.m[13];
        let tz = self.m[14];

        let mut m = [0.0; 16];
        m[0] = i00;
        m[1] = i10;
        m[2] = i20;
        m[4] = i01;
        m[5] = i11;
        m[6] = i21;
        m[8] = i02;
        m[9] = i12;
        m[10] = i22;
        m[12] = -(i00 * tx + i01 * ty + i02 * tz);
        m[13] = -(i10 * tx + i11 * ty + i12 * tz);
        m[14] = -(i20 * tx + i21 * ty + i22 * tz);
        m[15] = 1.0;
        Ok(Transform { m })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
