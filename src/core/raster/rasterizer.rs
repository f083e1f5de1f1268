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

//! Software Rasterizer
//!
//! Fills screen-space triangles row by row with a depth test, resolving
//! each pixel to a flat color or a texel.
//!
//! # Algorithm
//!
//! The rasterizer uses a scanline approach which splits triangles into
//! an upper and a lower half:
//!
//! 1. Sort vertices by Y coordinate
//! 2. Upper half: walk edge 1->2 against the long edge 1->3
//! 3. Lower half: walk edge 2->3 against the long edge 1->3
//! 4. Per row, sweep left to right interpolating `u/w`, `v/w` and `1/w`
//!
//! A half whose Y span is zero produces no rows. The middle row belongs to
//! the upper half when it has one, so no row is swept twice.
//!
//! # References
//!
//! - [Triangle Rasterization Tutorial](https://www.sunshine2k.de/coding/java/TriangleRasterization/TriangleRasterization.html)
//! - [Scratchapixel: Perspective Correct Interpolation](https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation/perspective-correct-interpolation-vertex-attributes.html)

use super::depth::DepthBuffer;
use super::texture::{TextureAtlas, YOrigin};
use crate::core::geometry::{Color, Triangle};

/// Interpolated attributes at one point of an edge or row
#[derive(Debug, Clone, Copy, Default)]
struct Fragment {
    x: f64,
    u: f64,
    v: f64,
    w: f64,
}

impl Fragment {
    #[inline]
    fn offset(&self, step: &Fragment, rows: i32) -> Fragment {
        let rows = rows as f64;
        Fragment {
            x: self.x + rows * step.x,
            u: self.u + rows * step.u,
            v: self.v + rows * step.v,
            w: self.w + rows * step.w,
        }
    }
}

/// A vertex after truncation to whole-pixel rows
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    y: i32,
    attrs: Fragment,
}

impl ScreenVertex {
    fn unpack(triangle: &Triangle, index: usize) -> Self {
        let (x, y, u, v, w) = triangle.unpack_vertex(index);
        Self {
            y,
            attrs: Fragment {
                x: x as f64,
                u,
                v,
                w,
            },
        }
    }

    /// Per-row change of every attribute walking towards `other`
    ///
    /// `None` when the edge spans no rows.
    fn step_to(&self, other: &ScreenVertex) -> Option<Fragment> {
        let dy = other.y - self.y;
        if dy <= 0 {
            return None;
        }
        let dy = dy as f64;
        Some(Fragment {
            x: (other.attrs.x - self.attrs.x) / dy,
            u: (other.attrs.u - self.attrs.u) / dy,
            v: (other.attrs.v - self.attrs.v) / dy,
            w: (other.attrs.w - self.attrs.w) / dy,
        })
    }

    #[inline]
    fn at_row(&self, step: &Fragment, y: i32) -> Fragment {
        self.attrs.offset(step, y - self.y)
    }
}

/// How the pixels of one triangle get their color
enum Shade<'a> {
    Flat(Color),
    Textured(&'a dyn TextureAtlas),
}

/// Depth-tested scanline triangle filler
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::{Color, Triangle};
/// use mini3d::core::raster::{DepthBuffer, Rasterizer};
///
/// let rasterizer = Rasterizer::default();
/// let mut depth = DepthBuffer::new(16, 16);
/// let mut tri = Triangle::colored(
///     [[0.0, 0.0, 0.0], [8.0, 0.0, 0.0], [0.0, 8.0, 0.0]],
///     Color::RED,
/// );
/// for uv in &mut tri.uvs {
///     uv.w = 1.0;
/// }
///
/// let mut pixels = 0;
/// rasterizer.draw_triangle(&mut depth, &tri, None, &mut |_, _, _| pixels += 1);
/// assert_eq!(pixels, 36);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Rasterizer {
    y_origin: YOrigin,
}

impl Rasterizer {
    /// Create a rasterizer sampling textures with the given V origin
    pub fn new(y_origin: YOrigin) -> Self {
        Self { y_origin }
    }

    pub fn y_origin(&self) -> YOrigin {
        self.y_origin
    }

    pub fn set_y_origin(&mut self, y_origin: YOrigin) {
        self.y_origin = y_origin;
    }

    /// Rasterize one screen-space triangle
    ///
    /// Vertex positions must already be in pixel coordinates inside the
    /// depth buffer, and `uvs` must hold `(u/w, v/w, 1/w)`.
    ///
    /// # Arguments
    ///
    /// * `depth` - Depth buffer tested and updated per pixel
    /// * `triangle` - Triangle to fill
    /// * `texture` - Texture sampled for every pixel when present; the flat
    ///   color is used only without one
    /// * `plot` - Called with `(x, y, color)` for every pixel that passes the
    ///   depth test, in row-major order
    ///
    /// # Panics
    ///
    /// Panics when no texture is given and the triangle has no flat color,
    /// or when a covered pixel lies outside the depth buffer.
    pub fn draw_triangle<F>(
        &self,
        depth: &mut DepthBuffer,
        triangle: &Triangle,
        texture: Option<&dyn TextureAtlas>,
        plot: &mut F,
    ) where
        F: FnMut(usize, usize, Color),
    {
        let shade = match (triangle.color, texture) {
            (_, Some(atlas)) => Shade::Textured(atlas),
            (Some(color), None) => Shade::Flat(color),
            (None, None) => panic!("draw error: triangle has neither a color nor a texture atlas"),
        };

        // Sort vertices by Y coordinate (p1.y <= p2.y <= p3.y)
        let mut verts = [0, 1, 2].map(|i| ScreenVertex::unpack(triangle, i));
        verts.sort_by_key(|v| v.y);
        let [p1, p2, p3] = verts;

        // Zero height overall: both halves are empty
        let Some(long) = p1.step_to(&p3) else {
            return;
        };

        let mut lower_start = p2.y;
        if let Some(upper) = p1.step_to(&p2) {
            for y in p1.y..=p2.y {
                let a = p1.at_row(&upper, y);
                let b = p1.at_row(&long, y);
                self.fill_row(depth, y, a, b, &shade, plot);
            }
            lower_start += 1;
        }

        if let Some(lower) = p2.step_to(&p3) {
            for y in lower_start..=p3.y {
                let a = p2.at_row(&lower, y);
                let b = p1.at_row(&long, y);
                self.fill_row(depth, y, a, b, &shade, plot);
            }
        }
    }

    /// Sweep one row from the smaller X to the larger, end exclusive
    fn fill_row<F>(
        &self,
        depth: &mut DepthBuffer,
        y: i32,
        mut start: Fragment,
        mut end: Fragment,
        shade: &Shade<'_>,
        plot: &mut F,
    ) where
        F: FnMut(usize, usize, Color),
    {
        if start.x > end.x {
            std::mem::swap(&mut start, &mut end);
        }

        let row = y as usize;
        let t_step = 1.0 / (end.x - start.x);
        let mut t = 0.0;
        let mut j = start.x;

        while j < end.x {
            let w = (1.0 - t) * start.w + t * end.w;
            let column = j as usize;

            if w > depth.at(column, row) {
                let color = match shade {
                    Shade::Flat(color) => *color,
                    Shade::Textured(atlas) => {
                        let u = (1.0 - t) * start.u + t * end.u;
                        let v = (1.0 - t) * start.v + t * end.v;
                        self.sample(*atlas, u / w, v / w)
                    }
                };
                plot(column, row, color);
                depth.set(column, row, w);
            }

            t += t_step;
            j += 1.0;
        }
    }

    /// Look up the texel for perspective-corrected `(u, v)`
    #[inline]
    fn sample(&self, atlas: &dyn TextureAtlas, u: f64, v: f64) -> Color {
        let width = atlas.width();
        let x = ((u * width.saturating_sub(1) as f64) as usize).min(width.saturating_sub(1));
        let y = self.y_origin.texel_row(v, atlas.height());
        atlas.color_at(x, y)
    }
}
