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

//! Camera controls
//!
//! Position plus yaw (about Y) and pitch (about X). None of these rebuild
//! the view matrix; call [`Engine::update`] afterwards.

use super::Engine;
use crate::core::math::{Matrix4x4, Vector3d};

impl<C> Engine<C> {
    /// Place the camera at `(x, y, z)`
    pub fn set_camera_position(&mut self, x: f64, y: f64, z: f64) {
        self.camera = Vector3d::point(x, y, z);
    }

    /// Move the camera by the given world-space offsets
    pub fn move_camera(&mut self, dx: f64, dy: f64, dz: f64) {
        self.camera = self.camera + Vector3d::direction(dx, dy, dz);
    }

    /// Set position and orientation in one call
    pub fn set_camera_position_absolute(&mut self, x: f64, y: f64, z: f64, yaw: f64, pitch: f64) {
        self.set_camera_position(x, y, z);
        self.yaw = yaw;
        self.pitch = pitch;
    }

    /// Offset position and orientation in one call
    pub fn set_camera_position_relative(
        &mut self,
        dx: f64,
        dy: f64,
        dz: f64,
        dyaw: f64,
        dpitch: f64,
    ) {
        self.move_camera(dx, dy, dz);
        self.rotate_camera(dyaw, dpitch);
    }

    pub fn set_yaw(&mut self, yaw: f64) {
        self.yaw = yaw;
    }

    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = pitch;
    }

    /// Turn the camera by the given yaw and pitch deltas
    pub fn rotate_camera(&mut self, dyaw: f64, dpitch: f64) {
        self.yaw += dyaw;
        self.pitch += dpitch;
    }

    /// Move along the current look direction
    ///
    /// Uses the current yaw and pitch, not the direction cached by the last
    /// `update`. Negative distances move backwards.
    pub fn move_camera_forward(&mut self, distance: f64) {
        let forward = self.forward();
        self.camera = self.camera + forward * distance;
    }

    pub fn camera_position(&self) -> Vector3d {
        self.camera
    }

    /// Look direction as of the last `update`
    ///
    /// Always unit length: pitch and yaw are composed as two full rotation
    /// matrices, so yaw sweeps the whole circle at any pitch.
    pub fn camera_direction(&self) -> Vector3d {
        self.direction
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Unit look direction for the current yaw and pitch
    ///
    /// `(0, 0, 1)` pitched about X, then yawed about Y.
    pub(crate) fn forward(&self) -> Vector3d {
        let rotation = Matrix4x4::rotation_x(self.pitch) * Matrix4x4::rotation_y(self.yaw);
        rotation.transform(&Vector3d::direction(0.0, 0.0, 1.0))
    }
}
