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

//! Built-in meshes

use super::mesh::Mesh;
use super::triangle::Triangle;
use crate::core::math::Matrix3x2;

/// Texture coordinates of the two triangles making up each cube face
const FACE_UVS: [Matrix3x2; 2] = [
    [[0.0, 1.0], [0.0, 0.0], [1.0, 0.0]],
    [[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
];

/// Cube faces as quads `(a, b, c, d)`, split into `(a, b, c)` and `(a, c, d)`
const CUBE_FACES: [[[f64; 3]; 4]; 6] = [
    // south
    [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
    // east
    [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    // north
    [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
    // west
    [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
    // top
    [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
    // bottom
    [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
];

/// Textured unit cube spanning `(0,0,0)` to `(1,1,1)`
///
/// Twelve triangles, two per face, wound so their normals point outwards.
/// Every face maps the full texture.
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::standard_cube;
///
/// let cube = standard_cube();
/// assert_eq!(cube.len(), 12);
/// assert_eq!(cube.center().x, 0.5);
/// ```
pub fn standard_cube() -> Mesh {
    let mut mesh = Mesh::new();
    for [a, b, c, d] in CUBE_FACES {
        mesh.add_triangle(Triangle::textured([a, b, c], FACE_UVS[0]));
        mesh.add_triangle(Triangle::textured([a, c, d], FACE_UVS[1]));
    }
    mesh
}
