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

//! Triangle clipping against a plane
//!
//! # Algorithm
//!
//! Each vertex is classified by its signed distance to the plane. Vertices
//! with a distance of zero or more are inside.
//!
//! | Inside | Result                                                        |
//! |--------|---------------------------------------------------------------|
//! | 0      | nothing                                                       |
//! | 3      | the input triangle, untouched                                 |
//! | 1      | inside vertex + both edge intersections                       |
//! | 2      | a quad split into two triangles sharing one intersection      |
//!
//! Texture coordinates are interpolated with the same edge parameter as the
//! position, so clipping never distorts the mapping.

use super::triangle::Triangle;
use crate::core::math::{Vector3d, VectorUv};

/// A plane given by a point on it and its normal
///
/// The normal points to the inside (kept) half-space and does not need to
/// be unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub point: Vector3d,
    pub normal: Vector3d,
}

impl ClipPlane {
    pub const fn new(point: Vector3d, normal: Vector3d) -> Self {
        Self { point, normal }
    }

    /// Signed distance of `v` to the plane, with the normal taken as is
    #[inline]
    fn distance(normal: &Vector3d, point: &Vector3d, v: &Vector3d) -> f64 {
        normal.x * v.x + normal.y * v.y + normal.z * v.z - normal.dot(point)
    }

    /// Signed distance of `v` to the plane using the unit normal
    ///
    /// Non-negative means inside.
    pub fn signed_distance(&self, v: &Vector3d) -> f64 {
        let normal = self.normal.normalized();
        Self::distance(&normal, &self.point, v)
    }
}

/// Result of clipping one triangle: up to two triangles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Clipped {
    triangles: [Triangle; 2],
    count: usize,
}

impl Clipped {
    fn none() -> Self {
        Self::default()
    }

    fn one(a: Triangle) -> Self {
        Self {
            triangles: [a, Triangle::default()],
            count: 1,
        }
    }

    fn two(a: Triangle, b: Triangle) -> Self {
        Self {
            triangles: [a, b],
            count: 2,
        }
    }

    /// Number of triangles produced (0, 1 or 2)
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// True when the whole triangle was outside
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The produced triangles
    #[inline]
    pub fn as_slice(&self) -> &[Triangle] {
        &self.triangles[..self.count]
    }
}

impl<'a> IntoIterator for &'a Clipped {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Where the segment `start -> end` crosses the plane
///
/// # Returns
///
/// The intersection point (carrying `start.w`) and the edge parameter `t`
/// used to interpolate the other vertex attributes.
fn intersect_plane(
    point: &Vector3d,
    normal: &Vector3d,
    start: &Vector3d,
    end: &Vector3d,
) -> (Vector3d, f64) {
    let normal = normal.normalized();
    let d = -normal.dot(point);
    let ad = start.dot(&normal);
    let bd = end.dot(&normal);
    let t = (-d - ad) / (bd - ad);
    let start_to_end = *end - *start;
    (*start + start_to_end * t, t)
}

/// Clip `triangle` against `plane`
///
/// # Arguments
///
/// * `plane` - Clip plane; the normal side is kept
/// * `triangle` - Triangle to clip
///
/// # Returns
///
/// Zero, one or two triangles covering the inside part of `triangle`.
/// Flat color is copied onto every produced triangle.
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::{clip_against_plane, ClipPlane, Color, Triangle};
/// use mini3d::core::math::Vector3d;
///
/// let plane = ClipPlane::new(
///     Vector3d::point(0.0, 0.0, 0.0),
///     Vector3d::direction(0.0, 0.0, 1.0),
/// );
/// let tri = Triangle::colored(
///     [[0.0, 0.0, 1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]],
///     Color::RED,
/// );
///
/// let clipped = clip_against_plane(&plane, &tri);
/// assert_eq!(clipped.len(), 1);
/// assert_eq!(clipped.as_slice()[0].vertices[1].z, 0.0);
/// ```
pub fn clip_against_plane(plane: &ClipPlane, triangle: &Triangle) -> Clipped {
    let normal = plane.normal.normalized();
    let point = &plane.point;

    let mut inside: [(Vector3d, VectorUv); 3] = Default::default();
    let mut outside: [(Vector3d, VectorUv); 3] = Default::default();
    let mut inside_count = 0;
    let mut outside_count = 0;

    for (vertex, uv) in triangle.vertices.iter().zip(triangle.uvs.iter()) {
        if ClipPlane::distance(&normal, point, vertex) >= 0.0 {
            inside[inside_count] = (*vertex, *uv);
            inside_count += 1;
        } else {
            outside[outside_count] = (*vertex, *uv);
            outside_count += 1;
        }
    }

    match inside_count {
        0 => Clipped::none(),
        3 => Clipped::one(*triangle),
        1 => {
            let (in_v, in_uv) = inside[0];
            let (out_v0, out_uv0) = outside[0];
            let (out_v1, out_uv1) = outside[1];

            let (v1, t1) = intersect_plane(point, &normal, &in_v, &out_v0);
            let (v2, t2) = intersect_plane(point, &normal, &in_v, &out_v1);

            Clipped::one(Triangle {
                vertices: [in_v, v1, v2],
                uvs: [in_uv, in_uv.lerp(&out_uv0, t1), in_uv.lerp(&out_uv1, t2)],
                color: triangle.color,
            })
        }
        _ => {
            let (in_v0, in_uv0) = inside[0];
            let (in_v1, in_uv1) = inside[1];
            let (out_v, out_uv) = outside[0];

            let (shared_v, t1) = intersect_plane(point, &normal, &in_v0, &out_v);
            let shared_uv = in_uv0.lerp(&out_uv, t1);

            let (v2, t2) = intersect_plane(point, &normal, &in_v1, &out_v);

            let first = Triangle {
                vertices: [in_v0, in_v1, shared_v],
                uvs: [in_uv0, in_uv1, shared_uv],
                color: triangle.color,
            };
            let second = Triangle {
                vertices: [in_v1, shared_v, v2],
                uvs: [in_uv1, shared_uv, in_uv1.lerp(&out_uv, t2)],
                color: triangle.color,
            };

            Clipped::two(first, second)
        }
    }
}
