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

//! mini3d headless renderer
//!
//! Renders a mesh (or the built-in cube) for a number of frames and writes
//! the last frame as a PNG. Settings come from an optional TOML config file;
//! command-line flags override it.

use std::path::PathBuf;

use clap::Parser;

use mini3d::core::geometry::{standard_cube, Color, Mesh};
use mini3d::core::loader::load_wavefront_obj;
use mini3d::core::raster::{TextureAtlas, YOrigin};
use mini3d::frontend::{Canvas, CheckerTexture, FrameTimer, ImageTexture, RenderConfig};
use mini3d::{Engine, EngineOptions};

#[derive(Debug, Parser)]
#[command(name = "mini3d-render", version, about = "Software 3D renderer")]
struct Args {
    /// Wavefront OBJ mesh to render (defaults to a textured cube)
    #[arg(long)]
    mesh: Option<PathBuf>,

    /// Texture image (PNG or JPEG)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// TOML render configuration
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f64>,

    /// Number of frames to render
    #[arg(long)]
    frames: Option<u32>,

    /// Output PNG path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Texture coordinates have V = 0 at the bottom of the image
    #[arg(long)]
    lower_left_uv: bool,

    /// Flat color for every triangle, as RRGGBB hex
    #[arg(long, value_parser = parse_color)]
    color: Option<Color>,

    /// Write frame statistics as JSON to this path
    #[arg(long)]
    metrics_json: Option<PathBuf>,
}

fn parse_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got '{}'", s));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|e| format!("invalid color '{}': {}", s, e))?;
    Ok(Color::from_u32(0xFF00_0000 | value))
}

impl Args {
    /// Fold command-line overrides into the loaded configuration
    fn apply(self, config: &mut RenderConfig) -> Option<PathBuf> {
        if let Some(mesh) = self.mesh {
            config.scene.mesh = Some(mesh);
        }
        if let Some(texture) = self.texture {
            config.scene.texture = Some(texture);
        }
        if let Some(width) = self.width {
            config.viewport.width = width;
        }
        if let Some(height) = self.height {
            config.viewport.height = height;
        }
        if let Some(fov) = self.fov {
            config.viewport.fov_degrees = fov;
        }
        if let Some(frames) = self.frames {
            config.output.frames = frames;
        }
        if let Some(output) = self.output {
            config.output.path = output;
        }
        if self.lower_left_uv {
            config.scene.y_origin = YOrigin::LowerLeft;
        }
        if let Some(color) = self.color {
            config.scene.color = Some(color);
        }
        self.metrics_json
    }
}

fn load_mesh(config: &RenderConfig) -> mini3d::Result<Mesh> {
    let mut mesh = match &config.scene.mesh {
        Some(path) => load_wavefront_obj(path)?,
        None => standard_cube(),
    };
    if let Some(color) = config.scene.color {
        mesh.set_color(color);
    }
    Ok(mesh)
}

/// Texture for the scene; none when a flat color is set, since any atlas
/// overrides flat colors
fn load_texture(
    config: &RenderConfig,
) -> mini3d::Result<Option<Box<dyn TextureAtlas + Send>>> {
    if config.scene.color.is_some() {
        if config.scene.texture.is_some() {
            log::warn!("Flat color set; ignoring texture");
        }
        return Ok(None);
    }

    Ok(Some(match &config.scene.texture {
        Some(path) => Box::new(ImageTexture::load(path)?),
        None => Box::new(CheckerTexture::default()),
    }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RenderConfig::load_or_default(path),
        None => RenderConfig::default(),
    };
    let metrics_path = args.apply(&mut config);

    let viewport = &config.viewport;
    if viewport.width == 0 || viewport.height == 0 {
        return Err(format!("invalid viewport {}x{}", viewport.width, viewport.height).into());
    }

    let mesh = load_mesh(&config)?;
    log::info!("Scene: {} triangles", mesh.len());

    let options = EngineOptions {
        texture_atlas: load_texture(&config)?,
        y_origin: config.scene.y_origin,
    };
    let mut engine = Engine::new(
        viewport.width,
        viewport.height,
        viewport.fov_degrees,
        Canvas::draw_pixel,
        options,
    );
    engine.add_mesh(mesh);

    let [x, y, z] = config.camera.position;
    engine.set_camera_position_absolute(x, y, z, config.camera.yaw, config.camera.pitch);

    let mut canvas = Canvas::new(viewport.width, viewport.height);
    let mut timer = FrameTimer::from_target(config.output.target_fps);
    let [spin_x, spin_y, spin_z] = config.scene.spin;

    log::info!(
        "Rendering {} frame(s) at {}x{}",
        config.output.frames,
        viewport.width,
        viewport.height
    );

    for _ in 0..config.output.frames {
        timer.wait_for_next_frame();

        engine.rotate_x(spin_x);
        engine.rotate_y(spin_y);
        engine.rotate_z(spin_z);
        engine.update();

        canvas.clear(config.output.background);
        engine.render(&mut canvas);

        timer.record(engine.metrics());
        timer.tick();
    }

    canvas.save_png(&config.output.path)?;

    let stats = timer.stats();
    log::info!(
        "Wrote {} ({} frames, {:.3}ms average render)",
        config.output.path.display(),
        stats.frames,
        stats.average_render_ms
    );

    if let Some(path) = metrics_path {
        std::fs::write(&path, serde_json::to_string_pretty(&stats)?)?;
        log::info!("Wrote metrics to {}", path.display());
    }

    Ok(())
}
