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

//! Homogeneous 3D vectors and texture coordinates

use std::ops::{Add, Div, Mul, Sub};

/// A point or direction in 3D space with a homogeneous scale factor
///
/// `w` is carried along untouched by the geometric operations (`+`, `-`,
/// scalar `*` and `/`, [`cross`](Self::cross)): the result always keeps the
/// left operand's `w`. Only the perspective divide in the pipeline gives `w`
/// its meaning.
///
/// # Examples
///
/// ```
/// use mini3d::core::math::Vector3d;
///
/// let a = Vector3d::new(1.0, 1.0, 1.0, 0.0);
/// let b = Vector3d::new(1.0, 1.0, 1.0, 1.0);
///
/// let sum = a + b;
/// assert_eq!(sum, Vector3d::new(2.0, 2.0, 2.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Homogeneous scale factor used for perspective correction
    pub w: f64,
}

impl Vector3d {
    /// Create a vector from all four components
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Create a point (`w = 1`)
    #[inline]
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Create a direction (`w = 0`)
    #[inline]
    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Dot product of the X/Y/Z components
    #[inline]
    pub fn dot(&self, other: &Vector3d) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean length of the X/Y/Z components
    #[inline]
    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Normalize in place
    ///
    /// `w` is left untouched. A zero-length vector is not guarded against:
    /// every component becomes NaN.
    #[inline]
    pub fn normalize(&mut self) {
        let len = self.length();
        self.x /= len;
        self.y /= len;
        self.z /= len;
    }

    /// Normalized copy of this vector
    #[inline]
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Cross product, keeping `self.w`
    #[inline]
    pub fn cross(&self, other: &Vector3d) -> Vector3d {
        Vector3d {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: self.w,
        }
    }

    /// Divide X/Y/Z by this vector's own `w` (perspective divide)
    ///
    /// `w` itself is kept so later stages can still read the pre-divide depth.
    #[inline]
    pub fn perspective_divide(&self) -> Vector3d {
        *self / self.w
    }
}

impl Add for Vector3d {
    type Output = Vector3d;

    #[inline]
    fn add(self, other: Vector3d) -> Vector3d {
        Vector3d {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w,
        }
    }
}

impl Sub for Vector3d {
    type Output = Vector3d;

    #[inline]
    fn sub(self, other: Vector3d) -> Vector3d {
        Vector3d {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w,
        }
    }
}

impl Mul<f64> for Vector3d {
    type Output = Vector3d;

    #[inline]
    fn mul(self, scalar: f64) -> Vector3d {
        Vector3d {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
            w: self.w,
        }
    }
}

impl Div<f64> for Vector3d {
    type Output = Vector3d;

    #[inline]
    fn div(self, scalar: f64) -> Vector3d {
        Vector3d {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
            w: self.w,
        }
    }
}

/// A single texture coordinate
///
/// `w` is the per-vertex reciprocal depth once the pipeline has divided the
/// coordinate through by the projected vertex `w`. Interpolating `u/w`, `v/w`
/// and `1/w` linearly in screen space and dividing back per pixel gives
/// perspective-correct texturing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VectorUv {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl VectorUv {
    #[inline]
    pub const fn new(u: f64, v: f64, w: f64) -> Self {
        Self { u, v, w }
    }

    /// Linear interpolation of all three components towards `other`
    #[inline]
    pub fn lerp(&self, other: &VectorUv, t: f64) -> VectorUv {
        VectorUv {
            u: t * (other.u - self.u) + self.u,
            v: t * (other.v - self.v) + self.v,
            w: t * (other.w - self.w) + self.w,
        }
    }

    /// Divide by a projected vertex `w`, storing the reciprocal in `w`
    #[inline]
    pub fn scale_w(&self, vertex_w: f64) -> VectorUv {
        VectorUv {
            u: self.u / vertex_w,
            v: self.v / vertex_w,
            w: 1.0 / vertex_w,
        }
    }
}
