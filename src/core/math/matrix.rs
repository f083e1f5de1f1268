// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! 4x4 transformation matrices
//!
//! Matrices are used with the vector on the left (`v * M`), so translation
//! lives in row 3 and a chain `A * B * C` applies `A` first.

use std::ops::{Index, IndexMut, Mul};

use super::vector::Vector3d;

/// A 4x4 matrix stored as 4 rows of 4 columns
///
/// # Examples
///
/// ```
/// use mini3d::core::math::{Matrix4x4, Vector3d};
///
/// let m = Matrix4x4::translation(1.0, 2.0, 3.0);
/// let p = m.transform(&Vector3d::point(0.0, 0.0, 0.0));
/// assert_eq!(p, Vector3d::point(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4x4 {
    m: [[f64; 4]; 4],
}

impl Matrix4x4 {
    /// Matrix with every cell set to zero
    pub const fn zero() -> Self {
        Self { m: [[0.0; 4]; 4] }
    }

    /// Identity matrix
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Build a matrix from explicit rows
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    /// Raw rows
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.m
    }

    /// Identity with a rotation about the X axis applied
    pub fn rotation_x(radians: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_x(radians);
        m
    }

    /// Identity with a rotation about the Y axis applied
    pub fn rotation_y(radians: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_y(radians);
        m
    }

    /// Identity with a rotation about the Z axis applied
    pub fn rotation_z(radians: f64) -> Self {
        let mut m = Self::identity();
        m.rotate_z(radians);
        m
    }

    /// Identity with a translation applied
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::identity();
        m.translate(x, y, z);
        m
    }

    /// Perspective projection matrix
    ///
    /// # Arguments
    ///
    /// * `fov` - Focal factor, `1 / tan(fov_radians / 2)`
    /// * `aspect_ratio` - Scale applied to X on top of `fov`
    /// * `near` - Near plane distance
    /// * `far` - Far plane distance
    ///
    /// The projected `w` equals the input `z`, which the pipeline divides
    /// through by.
    pub fn projection(fov: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        let mut m = Self::zero();
        m.m[0][0] = aspect_ratio * fov;
        m.m[1][1] = fov;
        m.m[2][2] = far / (far - near);
        m.m[3][2] = (-far * near) / (far - near);
        m.m[2][3] = 1.0;
        m.m[3][3] = 0.0;
        m
    }

    /// Camera basis looking from `eye` towards `target`
    ///
    /// `up` is orthogonalized against the forward direction (Gram-Schmidt),
    /// so it only needs to be roughly up. Rows are right, up, forward, eye.
    /// Its [`inverse`](Self::inverse) is the view matrix.
    pub fn point_at(eye: &Vector3d, target: &Vector3d, up: &Vector3d) -> Self {
        let forward = (*target - *eye).normalized();

        let a = forward * up.dot(&forward);
        let new_up = (*up - a).normalized();

        let right = new_up.cross(&forward);

        Self {
            m: [
                [right.x, right.y, right.z, 0.0],
                [new_up.x, new_up.y, new_up.z, 0.0],
                [forward.x, forward.y, forward.z, 0.0],
                [eye.x, eye.y, eye.z, 1.0],
            ],
        }
    }

    /// Write a rotation about the X axis into this matrix
    ///
    /// Only the cells that belong to this rotation are assigned; nothing is
    /// accumulated onto existing content. Start from [`identity`](Self::identity).
    pub fn rotate_x(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        self.m[0][0] = 1.0;
        self.m[1][1] = cos;
        self.m[1][2] = sin;
        self.m[2][1] = -sin;
        self.m[2][2] = cos;
        self.m[3][3] = 1.0;
    }

    /// Write a rotation about the Y axis into this matrix
    ///
    /// Same overwrite semantics as [`rotate_x`](Self::rotate_x).
    pub fn rotate_y(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        self.m[0][0] = cos;
        self.m[0][2] = sin;
        self.m[2][0] = -sin;
        self.m[1][1] = 1.0;
        self.m[2][2] = cos;
        self.m[3][3] = 1.0;
    }

    /// Write a rotation about the Z axis into this matrix
    ///
    /// Same overwrite semantics as [`rotate_x`](Self::rotate_x).
    pub fn rotate_z(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        self.m[0][0] = cos;
        self.m[0][1] = sin;
        self.m[1][0] = -sin;
        self.m[1][1] = cos;
        self.m[2][2] = 1.0;
        self.m[3][3] = 1.0;
    }

    /// Write a translation into this matrix
    ///
    /// Sets the diagonal to one and row 3 to the offsets.
    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.m[0][0] = 1.0;
        self.m[1][1] = 1.0;
        self.m[2][2] = 1.0;
        self.m[3][3] = 1.0;
        self.m[3][0] = x;
        self.m[3][1] = y;
        self.m[3][2] = z;
    }

    /// Matrix product `self * other`
    pub fn multiply(&self, other: &Matrix4x4) -> Matrix4x4 {
        let mut result = Self::zero();
        for c in 0..4 {
            for r in 0..4 {
                result.m[r][c] = self.m[r][0] * other.m[0][c]
                    + self.m[r][1] * other.m[1][c]
                    + self.m[r][2] * other.m[2][c]
                    + self.m[r][3] * other.m[3][c];
            }
        }
        result
    }

    /// Row vector product `v * self`, including `w`
    #[inline]
    pub fn transform(&self, v: &Vector3d) -> Vector3d {
        let m = &self.m;
        Vector3d {
            x: v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            y: v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            z: v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            w: v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        }
    }

    /// Inverse of a rigid transform
    ///
    /// Transposes the rotation block and rotates the negated translation.
    /// The result is wrong for matrices with scale, shear or projection.
    pub fn inverse(&self) -> Matrix4x4 {
        let m = &self.m;
        let mut inv = Self::zero();

        for r in 0..3 {
            for c in 0..3 {
                inv.m[r][c] = m[c][r];
            }
            inv.m[r][3] = 0.0;
        }

        for c in 0..3 {
            inv.m[3][c] =
                -(m[3][0] * inv.m[0][c] + m[3][1] * inv.m[1][c] + m[3][2] * inv.m[2][c]);
        }
        inv.m[3][3] = 1.0;

        inv
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Matrix4x4 {
    type Output = Matrix4x4;

    fn mul(self, other: Matrix4x4) -> Matrix4x4 {
        self.multiply(&other)
    }
}

impl Index<usize> for Matrix4x4 {
    type Output = [f64; 4];

    fn index(&self, row: usize) -> &[f64; 4] {
        &self.m[row]
    }
}

impl IndexMut<usize> for Matrix4x4 {
    fn index_mut(&mut self, row: usize) -> &mut [f64; 4] {
        &mut self.m[row]
    }
}

/// Three rows of X/Y/Z, used to spell out triangle vertices
pub type Matrix3x3 = [[f64; 3]; 3];

/// Three rows of U/V, used to spell out triangle texture coordinates
pub type Matrix3x2 = [[f64; 2]; 3];
