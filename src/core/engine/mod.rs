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

//! Rendering engine
//!
//! The [`Engine`] owns the meshes to draw, the global transform applied to
//! all of them, the camera, and the per-frame depth buffer. Rendering is an
//! explicit two-phase affair:
//!
//! 1. Mutate transform or camera state (`rotate_y`, `move_camera`, ...)
//! 2. Call [`Engine::update`] to rebuild the world and view matrices
//! 3. Call [`Engine::render`] to run the pipeline and emit pixels
//!
//! Mutators never rebuild matrices on their own, so skipping `update` renders
//! with the previous frame's matrices.
//!
//! # Coordinate System
//!
//! World space is left-handed with +Y up and the camera looking down +Z at
//! zero yaw and pitch. Screen space has its origin at the top-left corner:
//! - X-axis: 0 to width - 1 (left to right)
//! - Y-axis: 0 to height - 1 (top to bottom)
//!
//! # Pixel Output
//!
//! Pixels are handed to a draw hook together with a caller-owned context
//! passed to `render`, so the engine never owns the framebuffer.

use std::marker::PhantomData;

use crate::core::geometry::{Color, Mesh};
use crate::core::math::{Matrix4x4, Vector3d};
use crate::core::raster::{DepthBuffer, Rasterizer, TextureAtlas, YOrigin};

// Module declarations
mod camera;
mod metrics;
mod pipeline;
#[cfg(test)]
mod tests;

// Public re-exports
pub use metrics::Metrics;

/// Near clipping plane distance
pub const NEAR_PLANE: f64 = 0.1;

/// Far plane distance used by the projection matrix
pub const FAR_PLANE: f64 = 1000.0;

/// Per-pixel output callback: `(x, y, color, context)`
pub type DrawHook<C> = Box<dyn FnMut(usize, usize, Color, &mut C) + Send>;

/// Optional engine settings
///
/// # Examples
///
/// ```
/// use mini3d::core::engine::EngineOptions;
/// use mini3d::core::raster::YOrigin;
///
/// let options = EngineOptions::default().with_y_origin(YOrigin::LowerLeft);
/// assert_eq!(options.y_origin, YOrigin::LowerLeft);
/// assert!(options.texture_atlas.is_none());
/// ```
#[derive(Default)]
pub struct EngineOptions {
    /// Texture sampled for every triangle; flat colors apply only without one
    pub texture_atlas: Option<Box<dyn TextureAtlas + Send>>,

    /// Texture V origin
    pub y_origin: YOrigin,
}

impl EngineOptions {
    /// Use `atlas` for textured triangles
    pub fn with_texture_atlas(mut self, atlas: impl TextureAtlas + Send + 'static) -> Self {
        self.texture_atlas = Some(Box::new(atlas));
        self
    }

    /// Set the texture V origin
    pub fn with_y_origin(mut self, y_origin: YOrigin) -> Self {
        self.y_origin = y_origin;
        self
    }
}

/// Software 3D renderer
///
/// `C` is the type of the context handed to the draw hook on every pixel,
/// typically a framebuffer.
///
/// # Examples
///
/// ```
/// use mini3d::core::engine::{Engine, EngineOptions};
/// use mini3d::core::geometry::{standard_cube, Color};
///
/// let mut engine = Engine::new(
///     64,
///     64,
///     90.0,
///     |x, y, _color: Color, pixels: &mut Vec<(usize, usize)>| pixels.push((x, y)),
///     EngineOptions::default(),
/// );
///
/// let mut cube = standard_cube();
/// cube.set_color(Color::RED);
/// cube.set_position_relative(-0.5, -0.5, -0.5);
/// engine.add_mesh(cube);
///
/// engine.set_camera_position(0.0, 0.0, -5.0);
/// engine.update();
///
/// let mut pixels = Vec::new();
/// engine.render(&mut pixels);
/// assert!(!pixels.is_empty());
/// assert!(engine.metrics().triangles >= 1);
/// ```
pub struct Engine<C> {
    /// Viewport width in pixels
    pub(crate) width: usize,

    /// Viewport height in pixels
    pub(crate) height: usize,

    /// Meshes in draw order
    pub(crate) meshes: Vec<Mesh>,

    /// Accumulated global rotation about X, Y and Z (radians)
    pub(crate) rotation: Vector3d,

    /// Accumulated global translation
    pub(crate) translation: Vector3d,

    /// Global transform baked by `update`
    pub(crate) world: Matrix4x4,

    /// Camera position
    pub(crate) camera: Vector3d,

    /// Camera yaw in radians (left/right)
    pub(crate) yaw: f64,

    /// Camera pitch in radians (up/down)
    pub(crate) pitch: f64,

    /// Camera forward direction as of the last `update`
    pub(crate) direction: Vector3d,

    /// World to view space, baked by `update`
    pub(crate) view: Matrix4x4,

    /// View to clip space
    pub(crate) projection: Matrix4x4,

    /// Reciprocal depth per pixel, cleared each frame
    pub(crate) depth: DepthBuffer,

    /// Scanline filler
    pub(crate) rasterizer: Rasterizer,

    /// Texture for every triangle when set
    pub(crate) texture_atlas: Option<Box<dyn TextureAtlas + Send>>,

    /// Pixel output
    pub(crate) draw_hook: DrawHook<C>,

    /// Figures from the last `render`
    pub(crate) metrics: Metrics,

    _context: PhantomData<fn(&mut C)>,
}

impl<C> Engine<C> {
    /// Create an engine for a `width` x `height` viewport
    ///
    /// # Arguments
    ///
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fov_degrees` - Vertical field of view
    /// * `draw_hook` - Called for every pixel that passes the depth test
    /// * `options` - Texture atlas and texture V origin
    ///
    /// The camera starts at the origin looking down +Z and the matrices are
    /// already up to date, so `render` works without a prior `update`.
    pub fn new<F>(
        width: usize,
        height: usize,
        fov_degrees: f64,
        draw_hook: F,
        options: EngineOptions,
    ) -> Self
    where
        F: FnMut(usize, usize, Color, &mut C) + Send + 'static,
    {
        let fov = 1.0 / (fov_degrees * 0.5 / 180.0 * std::f64::consts::PI).tan();
        // Scales X, so a unit square stays square on a wide viewport
        let aspect_ratio = height as f64 / width as f64;

        let mut engine = Self {
            width,
            height,
            meshes: Vec::new(),
            rotation: Vector3d::default(),
            translation: Vector3d::default(),
            world: Matrix4x4::identity(),
            camera: Vector3d::point(0.0, 0.0, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            direction: Vector3d::direction(0.0, 0.0, 1.0),
            view: Matrix4x4::identity(),
            projection: Matrix4x4::projection(fov, aspect_ratio, NEAR_PLANE, FAR_PLANE),
            depth: DepthBuffer::new(width, height),
            rasterizer: Rasterizer::new(options.y_origin),
            texture_atlas: options.texture_atlas,
            draw_hook: Box::new(draw_hook),
            metrics: Metrics::default(),
            _context: PhantomData,
        };
        engine.update();

        log::debug!(
            "Engine created: {}x{} fov={}° y_origin={:?} textured={}",
            width,
            height,
            fov_degrees,
            options.y_origin,
            engine.texture_atlas.is_some()
        );

        engine
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    // ========================================================================
    // Meshes
    // ========================================================================

    /// Append a mesh to the draw list
    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    /// Meshes in draw order
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Mutable access to the meshes, e.g. to animate their own transforms
    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    /// Remove every mesh
    pub fn clear_meshes(&mut self) {
        self.meshes.clear();
    }

    // ========================================================================
    // Global Transform
    // ========================================================================

    /// Rotate all meshes further about the X axis
    pub fn rotate_x(&mut self, radians: f64) {
        self.rotation.x += radians;
    }

    /// Rotate all meshes further about the Y axis
    pub fn rotate_y(&mut self, radians: f64) {
        self.rotation.y += radians;
    }

    /// Rotate all meshes further about the Z axis
    pub fn rotate_z(&mut self, radians: f64) {
        self.rotation.z += radians;
    }

    /// Move all meshes further by the given offsets
    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.translation = self.translation + Vector3d::direction(x, y, z);
    }

    /// Drop the accumulated global rotation and translation
    pub fn reset_transform(&mut self) {
        self.rotation = Vector3d::default();
        self.translation = Vector3d::default();
    }

    /// Accumulated global rotation angles `(x, y, z)` in radians
    pub fn rotation(&self) -> (f64, f64, f64) {
        (self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Accumulated global translation
    pub fn translation(&self) -> (f64, f64, f64) {
        (self.translation.x, self.translation.y, self.translation.z)
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    /// World matrix as of the last `update`
    pub fn world_matrix(&self) -> &Matrix4x4 {
        &self.world
    }

    /// View matrix as of the last `update`
    pub fn view_matrix(&self) -> &Matrix4x4 {
        &self.view
    }

    pub fn projection_matrix(&self) -> &Matrix4x4 {
        &self.projection
    }

    // ========================================================================
    // Texturing
    // ========================================================================

    pub fn y_origin(&self) -> YOrigin {
        self.rasterizer.y_origin()
    }

    pub fn set_y_origin(&mut self, y_origin: YOrigin) {
        self.rasterizer.set_y_origin(y_origin);
    }

    /// Replace the texture atlas
    pub fn set_texture_atlas(&mut self, atlas: Option<Box<dyn TextureAtlas + Send>>) {
        self.texture_atlas = atlas;
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    /// Figures from the last `render`
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Duration of the last `render` in milliseconds
    pub fn render_time_ms(&self) -> f64 {
        self.metrics.render_time_ms()
    }
}
