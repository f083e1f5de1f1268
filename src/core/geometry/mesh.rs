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

//! Triangle meshes
//!
//! A [`Mesh`] owns its triangles, keeps an axis-aligned bounding box up to
//! date as triangles are added, and stores its own rotation and translation
//! matrices. The engine composes those matrices (X, Y, Z rotation, then
//! translation) in front of its global world matrix when rendering.

use super::color::Color;
use super::triangle::Triangle;
use crate::core::math::{Matrix4x4, Vector3d};

/// Axis-aligned bounding box
///
/// An empty box has `min = +inf` and `max = -inf` on every axis so the first
/// included point sets both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3d,
    pub max: Vector3d,
}

impl BoundingBox {
    /// A box containing nothing
    pub const fn empty() -> Self {
        Self {
            min: Vector3d::point(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Vector3d::point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// True until a point has been included
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Reset every axis back to the empty state
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// Grow the box to contain `p`
    pub fn include(&mut self, p: &Vector3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Center point
    pub fn center(&self) -> Vector3d {
        Vector3d::point(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// Extent along each axis
    pub fn size(&self) -> Vector3d {
        Vector3d::direction(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

/// An ordered collection of triangles plus its own transform
///
/// `Clone` produces a fully independent deep copy.
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::{Color, Mesh, Triangle};
///
/// let mut mesh = Mesh::new();
/// mesh.add_triangle(Triangle::colored(
///     [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0], [1.0, 2.0, 3.0]],
///     Color::WHITE,
/// ));
///
/// assert_eq!(mesh.len(), 1);
/// assert_eq!(mesh.bounds().max.z, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bounds: BoundingBox,

    rot_x: Matrix4x4,
    rot_y: Matrix4x4,
    rot_z: Matrix4x4,
    translation: Matrix4x4,

    /// Rotation about an arbitrary point, kept apart from `transform()`
    pivot: Matrix4x4,
}

impl Mesh {
    /// Create an empty mesh with identity transforms
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from a list of triangles
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let mut mesh = Self::new();
        for triangle in triangles {
            mesh.add_triangle(triangle);
        }
        mesh
    }

    /// Append a triangle and grow the bounding box
    pub fn add_triangle(&mut self, triangle: Triangle) {
        for vertex in &triangle.vertices {
            self.bounds.include(vertex);
        }
        self.triangles.push(triangle);
    }

    /// Triangles in insertion order
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Mutable access to the triangles
    ///
    /// Call [`recompute_bounds`](Self::recompute_bounds) after moving vertices.
    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    /// Drop triangles past `len`
    pub fn truncate(&mut self, len: usize) {
        self.triangles.truncate(len);
        self.recompute_bounds();
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box of the untransformed vertices
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Rebuild the bounding box from scratch
    ///
    /// All six extents are reset before rescanning.
    pub fn recompute_bounds(&mut self) {
        self.bounds.reset();
        for triangle in &self.triangles {
            for vertex in &triangle.vertices {
                self.bounds.include(vertex);
            }
        }
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vector3d {
        self.bounds.center()
    }

    /// Give every triangle the same flat color
    pub fn set_color(&mut self, color: Color) {
        for triangle in &mut self.triangles {
            triangle.color = Some(color);
        }
    }

    /// Remove flat colors from every triangle
    pub fn clear_color(&mut self) {
        for triangle in &mut self.triangles {
            triangle.color = None;
        }
    }

    /// Move the vertices themselves by the given offsets
    ///
    /// Unlike [`translate`](Self::translate) this bakes the offset into the
    /// geometry.
    pub fn set_position_relative(&mut self, dx: f64, dy: f64, dz: f64) {
        for triangle in &mut self.triangles {
            triangle.translate(dx, dy, dz);
        }
        if !self.bounds.is_empty() {
            let offset = Vector3d::direction(dx, dy, dz);
            self.bounds.min = self.bounds.min + offset;
            self.bounds.max = self.bounds.max + offset;
        }
    }

    /// Set the mesh translation
    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.translation.translate(x, y, z);
    }

    /// Set the mesh rotation about the X axis
    pub fn rotate_x(&mut self, radians: f64) {
        self.rot_x.rotate_x(radians);
    }

    /// Set the mesh rotation about the Y axis
    pub fn rotate_y(&mut self, radians: f64) {
        self.rot_y.rotate_y(radians);
    }

    /// Set the mesh rotation about the Z axis
    pub fn rotate_z(&mut self, radians: f64) {
        self.rot_z.rotate_z(radians);
    }

    /// Set the pivot transform to a rotation about X through `pivot`
    pub fn rotate_x_around(&mut self, radians: f64, pivot: &Vector3d) {
        self.pivot = Self::around(Matrix4x4::rotation_x(radians), pivot);
    }

    /// Set the pivot transform to a rotation about Y through `pivot`
    pub fn rotate_y_around(&mut self, radians: f64, pivot: &Vector3d) {
        self.pivot = Self::around(Matrix4x4::rotation_y(radians), pivot);
    }

    /// Set the pivot transform to a rotation about Z through `pivot`
    pub fn rotate_z_around(&mut self, radians: f64, pivot: &Vector3d) {
        self.pivot = Self::around(Matrix4x4::rotation_z(radians), pivot);
    }

    fn around(rotation: Matrix4x4, pivot: &Vector3d) -> Matrix4x4 {
        Matrix4x4::translation(-pivot.x, -pivot.y, -pivot.z)
            * rotation
            * Matrix4x4::translation(pivot.x, pivot.y, pivot.z)
    }

    /// Current translation offsets
    pub fn position(&self) -> Vector3d {
        let row = self.translation[3];
        Vector3d::point(row[0], row[1], row[2])
    }

    /// Composed mesh transform: X, Y, Z rotation, then translation
    pub fn transform(&self) -> Matrix4x4 {
        self.rot_x * self.rot_y * self.rot_z * self.translation
    }

    /// Rotation about an arbitrary point set by the `rotate_*_around` helpers
    ///
    /// Not part of [`transform`](Self::transform); the engine does not apply
    /// it.
    pub fn pivot_transform(&self) -> Matrix4x4 {
        self.pivot
    }
}
