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

//! Engine tests

use super::*;
use crate::core::geometry::{standard_cube, Triangle};
use crate::core::raster::TextureAtlas;
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-9;

/// Framebuffer used as the draw hook context
struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<Option<Color>>,
    writes: usize,
}

impl Frame {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width * height],
            writes: 0,
        }
    }

    fn at(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels[y * self.width + x]
    }

    fn filled(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }
}

fn plot(x: usize, y: usize, color: Color, frame: &mut Frame) {
    assert!(x < frame.width && y < frame.height, "pixel ({}, {}) off screen", x, y);
    frame.pixels[y * frame.width + x] = Some(color);
    frame.writes += 1;
}

fn engine(width: usize, height: usize) -> Engine<Frame> {
    Engine::new(width, height, 90.0, plot, EngineOptions::default())
}

/// Two-triangle square in the plane `z`, facing -Z
fn square(z: f64, color: Color) -> Mesh {
    Mesh::from_triangles(vec![
        Triangle::colored([[-1.0, -1.0, z], [-1.0, 1.0, z], [1.0, 1.0, z]], color),
        Triangle::colored([[-1.0, -1.0, z], [1.0, 1.0, z], [1.0, -1.0, z]], color),
    ])
}

struct Checker;

impl TextureAtlas for Checker {
    fn width(&self) -> usize {
        8
    }

    fn height(&self) -> usize {
        8
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        if (x + y) % 2 == 0 {
            Color::WHITE
        } else {
            Color::BLACK
        }
    }
}

// ============================================================================
// Construction Tests
// ============================================================================

#[test]
fn test_new_engine_is_ready_to_render() {
    let mut engine = engine(32, 32);
    assert_eq!(engine.width(), 32);
    assert_eq!(engine.height(), 32);
    assert_eq!(*engine.world_matrix(), Matrix4x4::identity());
    assert_eq!(engine.y_origin(), YOrigin::UpperLeft);

    let mut frame = Frame::new(32, 32);
    engine.render(&mut frame);
    assert_eq!(frame.writes, 0);
    assert_eq!(engine.metrics().triangles, 0);
}

#[test]
fn test_projection_uses_fov() {
    let engine = engine(64, 64);
    let p = engine.projection_matrix();
    // tan(45°) = 1
    assert!((p[1][1] - 1.0).abs() < EPS);
    assert!((p[0][0] - 1.0).abs() < EPS);
    assert_eq!(p[2][3], 1.0);
}

#[test]
fn test_engine_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Engine<Frame>>();
}

#[test]
fn test_mesh_management() {
    let mut engine = engine(16, 16);
    engine.add_mesh(square(0.0, Color::RED));
    engine.add_mesh(standard_cube());
    assert_eq!(engine.meshes().len(), 2);

    engine.meshes_mut()[0].translate(1.0, 0.0, 0.0);
    assert_eq!(engine.meshes()[0].position().x, 1.0);

    engine.clear_meshes();
    assert!(engine.meshes().is_empty());
}

// ============================================================================
// Global Transform Tests
// ============================================================================

#[test]
fn test_rotations_accumulate() {
    let mut engine = engine(16, 16);
    engine.rotate_y(0.25);
    engine.rotate_y(0.25);
    engine.update();

    let expected = Matrix4x4::rotation_y(0.5);
    for r in 0..4 {
        for c in 0..4 {
            assert!((engine.world_matrix()[r][c] - expected[r][c]).abs() < EPS);
        }
    }
}

#[test]
fn test_translation_accumulates_and_resets() {
    let mut engine = engine(16, 16);
    engine.translate(1.0, 2.0, 3.0);
    engine.translate(1.0, 0.0, -1.0);
    assert_eq!(engine.translation(), (2.0, 2.0, 2.0));

    engine.update();
    assert_eq!(engine.world_matrix()[3], [2.0, 2.0, 2.0, 1.0]);

    engine.rotate_x(1.0);
    engine.reset_transform();
    assert_eq!(engine.rotation(), (0.0, 0.0, 0.0));
    assert_eq!(engine.translation(), (0.0, 0.0, 0.0));

    engine.update();
    assert_eq!(*engine.world_matrix(), Matrix4x4::identity());
}

#[test]
fn test_render_uses_matrices_from_last_update() {
    let mut engine = engine(64, 64);
    engine.add_mesh(square(0.0, Color::RED));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut before = Frame::new(64, 64);
    engine.render(&mut before);
    assert!(before.filled() > 0);

    // Not baked yet: identical frame
    engine.translate(10.0, 0.0, 0.0);
    let mut stale = Frame::new(64, 64);
    engine.render(&mut stale);
    assert_eq!(stale.pixels, before.pixels);

    engine.update();
    let mut moved = Frame::new(64, 64);
    engine.render(&mut moved);
    assert_eq!(moved.filled(), 0);
}

// ============================================================================
// Camera Tests
// ============================================================================

#[test]
fn test_camera_position_controls() {
    let mut engine = engine(16, 16);
    engine.set_camera_position(1.0, 2.0, 3.0);
    engine.move_camera(1.0, -2.0, 0.5);
    assert_eq!(engine.camera_position(), Vector3d::point(2.0, 0.0, 3.5));

    engine.set_camera_position_absolute(0.0, 0.0, -5.0, 0.5, 0.25);
    assert_eq!(engine.camera_position(), Vector3d::point(0.0, 0.0, -5.0));
    assert_eq!((engine.yaw(), engine.pitch()), (0.5, 0.25));

    engine.set_camera_position_relative(1.0, 0.0, 1.0, 0.5, -0.25);
    assert_eq!(engine.camera_position(), Vector3d::point(1.0, 0.0, -4.0));
    assert_eq!((engine.yaw(), engine.pitch()), (1.0, 0.0));

    engine.set_yaw(0.0);
    engine.set_pitch(0.1);
    engine.rotate_camera(0.2, 0.1);
    assert!((engine.yaw() - 0.2).abs() < EPS);
    assert!((engine.pitch() - 0.2).abs() < EPS);
}

#[test]
fn test_camera_direction_follows_yaw_after_update() {
    let mut engine = engine(16, 16);
    let d = engine.camera_direction();
    assert_eq!((d.x, d.y, d.z), (0.0, 0.0, 1.0));

    engine.set_yaw(FRAC_PI_2);
    // Cached until the next update
    assert_eq!(engine.camera_direction().z, 1.0);

    engine.update();
    let d = engine.camera_direction();
    assert!((d.x + 1.0).abs() < EPS);
    assert!(d.y.abs() < EPS);
    assert!(d.z.abs() < EPS);
}

#[test]
fn test_camera_direction_follows_pitch() {
    let mut engine = engine(16, 16);
    engine.set_pitch(FRAC_PI_2);
    engine.update();
    let d = engine.camera_direction();
    assert!(d.x.abs() < EPS);
    assert!((d.y + 1.0).abs() < EPS);
    assert!(d.z.abs() < EPS);
}

#[test]
fn test_camera_direction_is_unit_for_combined_angles() {
    let (yaw, pitch) = (2.0, 0.7);
    let mut engine = engine(16, 16);
    engine.set_camera_position_absolute(0.0, 0.0, 0.0, yaw, pitch);
    engine.update();

    let d = engine.camera_direction();
    assert!((d.length() - 1.0).abs() < EPS);
    assert!((d.x + yaw.sin() * pitch.cos()).abs() < EPS);
    assert!((d.y + pitch.sin()).abs() < EPS);
    assert!((d.z - yaw.cos() * pitch.cos()).abs() < EPS);
}

#[test]
fn test_move_camera_forward() {
    let mut engine = engine(16, 16);
    engine.move_camera_forward(2.0);
    assert_eq!(engine.camera_position(), Vector3d::point(0.0, 0.0, 2.0));

    engine.set_yaw(FRAC_PI_2);
    engine.move_camera_forward(-1.0);
    let p = engine.camera_position();
    assert!((p.x - 1.0).abs() < EPS);
    assert!((p.z - 2.0).abs() < EPS);
    assert_eq!(p.w, 1.0);
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn test_front_facing_square_is_drawn_centered() {
    let mut engine = engine(64, 64);
    engine.add_mesh(square(0.0, Color::RED));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);

    assert_eq!(engine.metrics().triangles, 2);
    assert_eq!(frame.at(32, 32), Some(Color::RED));
    assert_eq!(frame.at(2, 2), None);
    assert_eq!(frame.at(60, 60), None);
}

#[test]
fn test_back_facing_triangle_draws_nothing() {
    let mut engine = engine(64, 64);
    engine.add_mesh(Mesh::from_triangles(vec![Triangle::colored(
        [[-1.0, -1.0, 0.0], [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]],
        Color::RED,
    )]));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);

    assert_eq!(frame.writes, 0);
    assert_eq!(engine.metrics().triangles, 0);
}

#[test]
fn test_degenerate_triangle_is_skipped() {
    let mut engine = engine(64, 64);
    engine.add_mesh(Mesh::from_triangles(vec![Triangle::colored(
        [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [2.0, 2.0, 0.0]],
        Color::RED,
    )]));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);
    assert_eq!(engine.metrics().triangles, 0);
}

#[test]
fn test_nearer_mesh_wins_regardless_of_order() {
    for near_first in [false, true] {
        let mut engine = engine(64, 64);
        let near = square(0.0, Color::RED);
        let far = square(2.0, Color::BLUE);
        if near_first {
            engine.add_mesh(near);
            engine.add_mesh(far);
        } else {
            engine.add_mesh(far);
            engine.add_mesh(near);
        }
        engine.set_camera_position(0.0, 0.0, -5.0);
        engine.update();

        let mut frame = Frame::new(64, 64);
        engine.render(&mut frame);
        assert_eq!(frame.at(32, 32), Some(Color::RED), "near_first={}", near_first);
    }
}

#[test]
fn test_depth_buffer_cleared_between_frames() {
    let mut engine = engine(64, 64);
    engine.add_mesh(square(0.0, Color::RED));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut first = Frame::new(64, 64);
    engine.render(&mut first);
    let mut second = Frame::new(64, 64);
    engine.render(&mut second);

    assert!(first.writes > 0);
    assert_eq!(first.writes, second.writes);
}

#[test]
fn test_triangle_crossing_near_plane_is_clipped() {
    let mut engine = engine(64, 64);
    engine.add_mesh(Mesh::from_triangles(vec![Triangle::colored(
        [[-1.0, -1.0, 3.0], [-1.0, 1.0, 3.0], [1.0, 0.0, -1.0]],
        Color::GREEN,
    )]));
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);

    assert!(engine.metrics().triangles >= 1);
    assert!(frame.filled() > 0);
}

#[test]
fn test_mesh_transform_is_applied() {
    let mut engine = engine(64, 64);
    let mut mesh = square(0.0, Color::RED);
    mesh.translate(10.0, 0.0, 0.0);
    engine.add_mesh(mesh);
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);
    assert_eq!(frame.filled(), 0);

    engine.meshes_mut()[0].translate(0.0, 0.0, 0.0);
    engine.render(&mut frame);
    assert_eq!(frame.at(32, 32), Some(Color::RED));
}

#[test]
fn test_texture_atlas_overrides_flat_color() {
    let options = EngineOptions::default().with_texture_atlas(Checker);
    let mut engine = Engine::new(64, 64, 90.0, plot, options);
    engine.add_mesh(square(2.0, Color::RED));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);

    assert!(frame.filled() > 0);
    assert!(frame
        .pixels
        .iter()
        .flatten()
        .all(|c| *c == Color::WHITE || *c == Color::BLACK));
}

#[test]
fn test_flat_color_used_when_atlas_removed() {
    let options = EngineOptions::default().with_texture_atlas(Checker);
    let mut engine = Engine::new(64, 64, 90.0, plot, options);
    engine.set_texture_atlas(None);
    engine.add_mesh(square(2.0, Color::RED));
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);

    assert!(frame.filled() > 0);
    assert!(frame.pixels.iter().flatten().all(|c| *c == Color::RED));
}

#[test]
fn test_oversized_square_is_clipped_to_viewport() {
    let mut engine = engine(64, 48);
    engine.add_mesh(Mesh::from_triangles(vec![
        Triangle::colored(
            [[-50.0, -50.0, 0.5], [-50.0, 50.0, 0.5], [50.0, 50.0, 0.5]],
            Color::GREEN,
        ),
        Triangle::colored(
            [[-50.0, -50.0, 0.5], [50.0, 50.0, 0.5], [50.0, -50.0, 0.5]],
            Color::GREEN,
        ),
    ]));
    engine.set_camera_position(0.0, 0.0, -1.0);
    engine.update();

    // Off-screen pixels would trip the assert in `plot`
    let mut frame = Frame::new(64, 48);
    engine.render(&mut frame);

    assert!(engine.metrics().triangles > 2, "{:?}", engine.metrics());

    // Right clip edge sits at x = width - 1 and spans end exclusive
    for y in 0..48 {
        for x in 0..63 {
            assert_eq!(frame.at(x, y), Some(Color::GREEN), "pixel ({}, {})", x, y);
        }
        assert_eq!(frame.at(63, y), None, "row {}", y);
    }
    assert_eq!(frame.filled(), 63 * 48);
}

#[test]
fn test_wide_viewport_keeps_square_proportions() {
    let mut engine = engine(128, 64);
    assert!((engine.projection_matrix()[0][0] - 0.5).abs() < EPS);

    engine.add_mesh(square(0.0, Color::RED));
    engine.set_camera_position(0.0, 0.0, -2.0);
    engine.update();

    let mut frame = Frame::new(128, 64);
    engine.render(&mut frame);

    let across = (0..128).filter(|&x| frame.at(x, 32).is_some()).count();
    let down = (0..64).filter(|&y| frame.at(64, y).is_some()).count();
    assert!((30..=34).contains(&across), "across={}", across);
    assert!((across as i64 - down as i64).abs() <= 3, "across={} down={}", across, down);
}

#[test]
fn test_cube_end_to_end() {
    let options = EngineOptions::default().with_texture_atlas(Checker);
    let mut engine = Engine::new(256, 256, 90.0, plot, options);

    let mut cube = standard_cube();
    cube.set_position_relative(-0.5, -0.5, -0.5);
    engine.add_mesh(cube);
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(256, 256);
    engine.render(&mut frame);

    let metrics = engine.metrics();
    assert!((1..=12).contains(&metrics.triangles), "{:?}", metrics);
    assert!(engine.render_time_ms() >= 0.0);
    assert!(frame.filled() > 0);
    assert!(frame
        .pixels
        .iter()
        .flatten()
        .all(|c| *c == Color::WHITE || *c == Color::BLACK));
}

#[test]
fn test_spinning_cube_stays_on_screen() {
    let mut engine = engine(128, 96);
    let mut cube = standard_cube();
    cube.set_color(Color::BLUE);
    cube.set_position_relative(-0.5, -0.5, -0.5);
    engine.add_mesh(cube);
    engine.set_camera_position(0.0, 0.0, -3.0);

    for _ in 0..16 {
        engine.rotate_y(0.4);
        engine.rotate_x(0.15);
        engine.update();

        let mut frame = Frame::new(128, 96);
        engine.render(&mut frame);
        assert!((1..=12).contains(&engine.metrics().triangles));
    }
}

#[test]
fn test_lower_left_origin_option() {
    let options = EngineOptions::default()
        .with_texture_atlas(Checker)
        .with_y_origin(YOrigin::LowerLeft);
    let mut engine: Engine<Frame> = Engine::new(32, 32, 90.0, plot, options);
    assert_eq!(engine.y_origin(), YOrigin::LowerLeft);

    engine.set_y_origin(YOrigin::UpperLeft);
    assert_eq!(engine.y_origin(), YOrigin::UpperLeft);
}

#[test]
#[should_panic(expected = "neither a color nor a texture atlas")]
fn test_textured_mesh_without_atlas_panics() {
    let mut engine = engine(64, 64);
    let mut cube = standard_cube();
    cube.set_position_relative(-0.5, -0.5, -0.5);
    engine.add_mesh(cube);
    engine.set_camera_position(0.0, 0.0, -5.0);
    engine.update();

    let mut frame = Frame::new(64, 64);
    engine.render(&mut frame);
}
