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

//! Unit tests for RenderConfig

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::core::error::RenderError;
use crate::core::geometry::Color;
use crate::core::raster::YOrigin;
use crate::frontend::config::RenderConfig;

#[test]
fn test_default_config() {
    let config = RenderConfig::default();
    assert_eq!(config.viewport.width, 320);
    assert_eq!(config.viewport.height, 240);
    assert_eq!(config.viewport.fov_degrees, 90.0);
    assert_eq!(config.camera.position, [0.0, 0.0, -3.0]);
    assert_eq!(config.scene.mesh, None);
    assert_eq!(config.scene.y_origin, YOrigin::UpperLeft);
    assert_eq!(config.output.frames, 1);
    assert_eq!(config.output.path, PathBuf::from("frame.png"));
    assert_eq!(config.output.background, Color::BLACK);
}

#[test]
fn test_empty_toml_gives_defaults() {
    let config = RenderConfig::from_toml("").unwrap();
    assert_eq!(config, RenderConfig::default());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let config = RenderConfig::from_toml(
        r#"
        [viewport]
        width = 640

        [scene]
        mesh = "teapot.obj"
        y_origin = "lower-left"
        spin = [0.0, 0.1, 0.0]

        [output]
        frames = 30
        target_fps = 60
        background = { r = 10, g = 20, b = 30, a = 255 }
        "#,
    )
    .unwrap();

    assert_eq!(config.viewport.width, 640);
    assert_eq!(config.viewport.height, 240);
    assert_eq!(config.scene.mesh, Some(PathBuf::from("teapot.obj")));
    assert_eq!(config.scene.y_origin, YOrigin::LowerLeft);
    assert_eq!(config.scene.spin, [0.0, 0.1, 0.0]);
    assert_eq!(config.output.frames, 30);
    assert_eq!(config.output.target_fps, Some(60));
    assert_eq!(config.output.background, Color::rgb(10, 20, 30));
    assert_eq!(config.camera, RenderConfig::default().camera);
}

#[test]
fn test_invalid_toml_is_config_error() {
    let err = RenderConfig::from_toml("[viewport]\nwidth = \"wide\"").unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));
}

#[test]
fn test_save_and_load() {
    let mut config = RenderConfig::default();
    config.viewport.fov_degrees = 60.0;
    config.camera.yaw = 0.5;
    config.scene.texture = Some(PathBuf::from("bricks.png"));
    config.scene.color = Some(Color::RED);
    config.output.frames = 12;

    let file = NamedTempFile::new().unwrap();
    config.save(file.path()).unwrap();

    let loaded = RenderConfig::load(file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_from_written_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[camera]").unwrap();
    writeln!(file, "position = [1.0, 2.0, 3.0]").unwrap();
    writeln!(file, "pitch = -0.25").unwrap();
    file.flush().unwrap();

    let config = RenderConfig::load(file.path()).unwrap();
    assert_eq!(config.camera.position, [1.0, 2.0, 3.0]);
    assert_eq!(config.camera.pitch, -0.25);
    assert_eq!(config.camera.yaw, 0.0);
}

#[test]
fn test_load_missing_file() {
    let err = RenderConfig::load("/nonexistent/mini3d.toml").unwrap_err();
    assert!(matches!(err, RenderError::Config(_)));
}

#[test]
fn test_load_or_default_falls_back() {
    let config = RenderConfig::load_or_default("/nonexistent/mini3d.toml");
    assert_eq!(config, RenderConfig::default());
}
