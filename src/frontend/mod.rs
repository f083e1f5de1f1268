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

//! Frontend module
//!
//! Everything around the engine needed to turn a scene into image files.
//!
//! # Architecture
//!
//! - [`canvas`]: RGBA framebuffer used as the render context
//! - [`texture`]: Texture atlases backed by image files or a checkerboard
//! - [`config`]: TOML render configuration
//! - [`frame_timer`]: Frame pacing and render statistics
//!
//! # Example
//!
//! ```no_run
//! use mini3d::frontend::{Canvas, ImageTexture};
//! use mini3d::{Engine, EngineOptions};
//!
//! let texture = ImageTexture::load("bricks.png").unwrap();
//! let options = EngineOptions::default().with_texture_atlas(texture);
//! let mut engine = Engine::new(320, 240, 90.0, Canvas::draw_pixel, options);
//! let mut canvas = Canvas::new(320, 240);
//! engine.render(&mut canvas);
//! canvas.save_png("frame.png").unwrap();
//! ```

pub mod canvas;
pub mod config;
pub mod frame_timer;
pub mod texture;

pub use canvas::Canvas;
pub use config::RenderConfig;
pub use frame_timer::{FrameStats, FrameTimer};
pub use texture::{CheckerTexture, ImageTexture};

#[cfg(test)]
mod tests;
