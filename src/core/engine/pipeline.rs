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

//! Transform, clip and rasterize
//!
//! Per triangle, in mesh order then insertion order:
//!
//! 1. World transform (mesh transform, then the global world matrix)
//! 2. Back-face cull against the camera position
//! 3. View transform and near-plane clip
//! 4. Projection, perspective divide and viewport mapping
//! 5. Clip against the four viewport edges
//! 6. Rasterize whatever is left

use std::collections::VecDeque;
use std::time::Instant;

use super::{Engine, Metrics, NEAR_PLANE};
use crate::core::geometry::{clip_against_plane, ClipPlane, Triangle};
use crate::core::math::{Matrix4x4, Vector3d};
use crate::core::raster::TextureAtlas;

impl<C> Engine<C> {
    /// Rebuild the world and view matrices from the current state
    ///
    /// World is `rotX * rotY * rotZ * translation` of the accumulated global
    /// transform. View is the inverse of a point-at matrix from the camera
    /// along its yaw/pitch direction with +Y as up.
    pub fn update(&mut self) {
        self.world = Matrix4x4::identity()
            * Matrix4x4::rotation_x(self.rotation.x)
            * Matrix4x4::rotation_y(self.rotation.y)
            * Matrix4x4::rotation_z(self.rotation.z)
            * Matrix4x4::translation(self.translation.x, self.translation.y, self.translation.z);

        let up = Vector3d::direction(0.0, 1.0, 0.0);
        self.direction = self.forward();
        let target = self.camera + self.direction;

        self.view = Matrix4x4::point_at(&self.camera, &target, &up).inverse();

        log::trace!(
            "Update: camera=({:.3}, {:.3}, {:.3}) yaw={:.3} pitch={:.3}",
            self.camera.x,
            self.camera.y,
            self.camera.z,
            self.yaw,
            self.pitch
        );
    }

    /// Viewport edges in top, bottom, left, right order
    fn viewport_planes(&self) -> [ClipPlane; 4] {
        let right = self.width as f64 - 1.0;
        let bottom = self.height as f64 - 1.0;
        [
            ClipPlane::new(
                Vector3d::point(0.0, 0.0, 0.0),
                Vector3d::direction(0.0, 1.0, 0.0),
            ),
            ClipPlane::new(
                Vector3d::point(0.0, bottom, 0.0),
                Vector3d::direction(0.0, -1.0, 0.0),
            ),
            ClipPlane::new(
                Vector3d::point(0.0, 0.0, 0.0),
                Vector3d::direction(1.0, 0.0, 0.0),
            ),
            ClipPlane::new(
                Vector3d::point(right, 0.0, 0.0),
                Vector3d::direction(-1.0, 0.0, 0.0),
            ),
        ]
    }

    /// Map a view-space triangle to pixel coordinates
    ///
    /// After projection every vertex and texture coordinate is divided by
    /// the projected `w`, X and Y are flipped so +Y points down the screen,
    /// and the `-1..1` range is stretched over the viewport.
    fn to_screen(&self, viewed: &Triangle) -> Triangle {
        let mut projected = viewed.transformed(&self.projection);
        projected.perspective_divide();

        let offset = Vector3d::new(1.0, 1.0, 0.0, 1.0);
        let half_width = 0.5 * self.width as f64;
        let half_height = 0.5 * self.height as f64;

        for vertex in &mut projected.vertices {
            vertex.x = -vertex.x;
            vertex.y = -vertex.y;
            *vertex = *vertex + offset;
            vertex.x *= half_width;
            vertex.y *= half_height;
        }

        projected
    }

    /// Draw every mesh
    ///
    /// Clears the depth buffer, runs the full pipeline, calls the draw hook
    /// for each pixel that passes the depth test and records [`Metrics`].
    ///
    /// # Arguments
    ///
    /// * `context` - Passed through to the draw hook on every pixel
    ///
    /// # Panics
    ///
    /// Panics when a visible triangle has no flat color and the engine has no
    /// texture atlas.
    pub fn render(&mut self, context: &mut C) {
        let start = Instant::now();
        self.depth.clear();

        let near = ClipPlane::new(
            Vector3d::point(0.0, 0.0, NEAR_PLANE),
            Vector3d::direction(0.0, 0.0, 1.0),
        );
        let edges = self.viewport_planes();

        let mut to_raster = Vec::new();
        let mut culled = 0usize;

        for mesh in &self.meshes {
            let transform = mesh.transform() * self.world;

            for triangle in mesh.triangles() {
                let world = triangle.transformed(&transform);

                // Facing away, edge-on or degenerate
                let ray = world.vertices[0] - self.camera;
                let facing = world.normal().dot(&ray);
                if facing.is_nan() || facing >= 0.0 {
                    culled += 1;
                    continue;
                }

                let viewed = world.transformed(&self.view);
                for clipped in &clip_against_plane(&near, &viewed) {
                    to_raster.push(self.to_screen(clipped));
                }
            }
        }

        let texture = self
            .texture_atlas
            .as_deref()
            .map(|atlas| atlas as &dyn TextureAtlas);
        let draw_hook = &mut self.draw_hook;
        let mut plot = |x: usize, y: usize, color| draw_hook(x, y, color, context);

        let mut queue = VecDeque::new();
        let mut triangles = 0usize;

        for projected in to_raster {
            queue.clear();
            queue.push_back(projected);

            for edge in &edges {
                for _ in 0..queue.len() {
                    let Some(candidate) = queue.pop_front() else {
                        break;
                    };
                    queue.extend(clip_against_plane(edge, &candidate).as_slice().iter().copied());
                }
            }

            for visible in queue.drain(..) {
                self.rasterizer
                    .draw_triangle(&mut self.depth, &visible, texture, &mut plot);
                triangles += 1;
            }
        }

        self.metrics = Metrics {
            triangles,
            render_time: start.elapsed(),
        };

        log::trace!(
            "Render: {} meshes, {} culled, {} rasterized in {:.3}ms",
            self.meshes.len(),
            culled,
            triangles,
            self.metrics.render_time_ms()
        );
    }
}
