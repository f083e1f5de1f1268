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

//! Render configuration
//!
//! Settings for the headless renderer, stored as TOML:
//!
//! ```toml
//! [viewport]
//! width = 320
//! height = 240
//! fov_degrees = 90.0
//!
//! [camera]
//! position = [0.0, 0.0, -3.0]
//! yaw = 0.0
//! pitch = 0.0
//!
//! [scene]
//! mesh = "assets/teapot.obj"
//! texture = "assets/bricks.png"
//! y_origin = "lower-left"
//! spin = [0.0, 0.05, 0.0]
//!
//! [output]
//! path = "frame.png"
//! frames = 60
//! ```
//!
//! Every key is optional; missing keys take their default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{RenderError, Result};
use crate::core::geometry::Color;
use crate::core::raster::YOrigin;

/// Complete renderer configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub viewport: ViewportConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub output: OutputConfig,
}

/// Viewport size and field of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            fov_degrees: 90.0,
        }
    }
}

/// Initial camera placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f64; 3],
    /// Radians, positive turns left
    pub yaw: f64,
    /// Radians, positive looks down
    pub pitch: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -3.0],
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// What to draw
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Wavefront OBJ file; the built-in cube when unset
    pub mesh: Option<PathBuf>,
    /// Texture image; a checkerboard when unset
    pub texture: Option<PathBuf>,
    /// Texture V origin of the mesh's texture coordinates
    pub y_origin: YOrigin,
    /// Global rotation added every frame, radians about X, Y and Z
    pub spin: [f64; 3],
    /// Flat color for every triangle; disables texturing
    pub color: Option<Color>,
}

/// Where and how often to render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// PNG written after the last frame
    pub path: PathBuf,
    /// Frames to render
    pub frames: u32,
    /// Frame pacing; unpaced when unset
    pub target_fps: Option<u32>,
    /// Canvas clear color
    pub background: Color,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("frame.png"),
            frames: 1,
            target_fps: None,
            background: Color::BLACK,
        }
    }
}

impl RenderConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            RenderError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    /// Load configuration, falling back to defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::info!("Using default render config ({})", e);
            Self::default()
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| RenderError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| RenderError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| {
            RenderError::Config(format!("Failed to write config file '{}': {}", path.display(), e))
        })
    }
}
