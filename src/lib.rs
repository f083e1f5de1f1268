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

//! mini3d: a software 3D renderer
//!
//! Triangle meshes are transformed through model, view and projection
//! space, back-face culled, clipped against the near plane and the viewport
//! edges, and filled by a depth-buffered scanline rasterizer with
//! perspective-correct texturing. No GPU is involved.
//!
//! # Architecture
//!
//! - [`core`]: The rendering pipeline (math, geometry, rasterizer, engine,
//!   mesh loading)
//! - [`frontend`]: Adapters around the core (configuration, RGBA canvas,
//!   image textures, frame timing)
//!
//! # Example
//!
//! ```
//! use mini3d::core::engine::{Engine, EngineOptions};
//! use mini3d::core::geometry::standard_cube;
//! use mini3d::frontend::{Canvas, CheckerTexture};
//!
//! let options = EngineOptions::default().with_texture_atlas(CheckerTexture::default());
//! let mut engine = Engine::new(128, 128, 90.0, Canvas::draw_pixel, options);
//!
//! let mut cube = standard_cube();
//! cube.set_position_relative(-0.5, -0.5, -0.5);
//! engine.add_mesh(cube);
//!
//! engine.set_camera_position(0.0, 0.0, -3.0);
//! engine.rotate_y(0.5);
//! engine.update();
//!
//! let mut canvas = Canvas::new(128, 128);
//! engine.render(&mut canvas);
//! println!("{} triangles in {:.2}ms", engine.metrics().triangles, engine.render_time_ms());
//! ```
//!
//! # Getting Started
//!
//! 1. Create an [`Engine`] with a viewport size, field of view and draw hook
//! 2. Add meshes (built by hand, [`core::geometry::standard_cube`] or
//!    [`core::loader::load_wavefront_obj`])
//! 3. Adjust the camera and global transform, then call `update`
//! 4. Call `render` once per frame
//!
//! # Error Handling
//!
//! All fallible operations outside the render path return
//! [`core::error::Result<T>`], an alias for `Result<T, RenderError>`. Mesh
//! parsing returns the more specific [`MeshError`].

pub mod core;
pub mod frontend;

// Re-export commonly used types
pub use core::engine::{Engine, EngineOptions, Metrics};
pub use core::error::{MeshError, RenderError, Result};
