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

//! Triangle primitive

use super::color::Color;
use crate::core::math::{Matrix3x2, Matrix3x3, Matrix4x4, Vector3d, VectorUv};

/// A single triangle
///
/// Vertices and texture coordinates are index-aligned: `uvs[n]` belongs to
/// `vertices[n]`. When the engine has a texture atlas every triangle is
/// sampled from it; otherwise the flat `color` is used.
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::{Color, Triangle};
///
/// let tri = Triangle::colored(
///     [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
///     Color::RED,
/// );
/// assert_eq!(tri.color, Some(Color::RED));
/// assert_eq!(tri.vertices[1].y, 1.0);
/// assert_eq!(tri.vertices[1].w, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    /// Vertices in clockwise order
    pub vertices: [Vector3d; 3],

    /// Texture coordinates, one per vertex
    pub uvs: [VectorUv; 3],

    /// Optional flat color
    pub color: Option<Color>,
}

impl Triangle {
    /// Create a triangle from its parts
    pub fn new(vertices: [Vector3d; 3], uvs: [VectorUv; 3], color: Option<Color>) -> Self {
        Self {
            vertices,
            uvs,
            color,
        }
    }

    /// Flat-colored triangle with each row of `m` as a vertex (`w = 1`)
    pub fn colored(m: Matrix3x3, color: Color) -> Self {
        Self {
            vertices: Self::vertices_from_rows(&m),
            uvs: [VectorUv::default(); 3],
            color: Some(color),
        }
    }

    /// Textured triangle with each row of `m` as a vertex and of `uv` as its
    /// texture coordinate
    pub fn textured(m: Matrix3x3, uv: Matrix3x2) -> Self {
        Self {
            vertices: Self::vertices_from_rows(&m),
            uvs: [
                VectorUv::new(uv[0][0], uv[0][1], 1.0),
                VectorUv::new(uv[1][0], uv[1][1], 1.0),
                VectorUv::new(uv[2][0], uv[2][1], 1.0),
            ],
            color: None,
        }
    }

    fn vertices_from_rows(m: &Matrix3x3) -> [Vector3d; 3] {
        [
            Vector3d::point(m[0][0], m[0][1], m[0][2]),
            Vector3d::point(m[1][0], m[1][1], m[1][2]),
            Vector3d::point(m[2][0], m[2][1], m[2][2]),
        ]
    }

    /// Unit surface normal, `(v1 - v0) x (v2 - v0)`
    ///
    /// A zero-area triangle yields NaN components.
    pub fn normal(&self) -> Vector3d {
        let l1 = self.vertices[1] - self.vertices[0];
        let l2 = self.vertices[2] - self.vertices[0];
        l1.cross(&l2).normalized()
    }

    /// Copy of this triangle with every vertex multiplied by `m`
    ///
    /// Texture coordinates and color are carried over unchanged.
    #[inline]
    pub fn transformed(&self, m: &Matrix4x4) -> Triangle {
        Triangle {
            vertices: [
                m.transform(&self.vertices[0]),
                m.transform(&self.vertices[1]),
                m.transform(&self.vertices[2]),
            ],
            uvs: self.uvs,
            color: self.color,
        }
    }

    /// Perspective divide of a freshly projected triangle
    ///
    /// Texture coordinates become `(u/w, v/w, 1/w)` and vertex X/Y/Z are
    /// divided by `w`. Both use the projected `w`, so the texture step runs
    /// first.
    pub fn perspective_divide(&mut self) {
        for n in 0..3 {
            self.uvs[n] = self.uvs[n].scale_w(self.vertices[n].w);
            self.vertices[n] = self.vertices[n].perspective_divide();
        }
    }

    /// Move every vertex by the given offsets
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        let offset = Vector3d::direction(dx, dy, dz);
        for vertex in &mut self.vertices {
            *vertex = *vertex + offset;
        }
    }

    /// Screen-space unpacking used by the rasterizer
    ///
    /// Position is truncated to whole pixels; texture attributes stay exact.
    ///
    /// # Returns
    ///
    /// `(x, y, u, v, w)` for vertex `index`
    #[inline]
    pub fn unpack_vertex(&self, index: usize) -> (i32, i32, f64, f64, f64) {
        let v = &self.vertices[index];
        let uv = &self.uvs[index];
        (v.x as i32, v.y as i32, uv.u, uv.v, uv.w)
    }
}
