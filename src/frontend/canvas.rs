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

//! RGBA pixel sink
//!
//! A [`Canvas`] is the usual render context: pass [`Canvas::draw_pixel`] as
//! the engine's draw hook and a canvas to `render`.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::core::error::{RenderError, Result};
use crate::core::geometry::Color;

/// 8-bit RGBA framebuffer
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::Color;
/// use mini3d::frontend::Canvas;
///
/// let mut canvas = Canvas::new(4, 4);
/// canvas.put_pixel(1, 2, Color::RED);
/// assert_eq!(canvas.pixel(1, 2), Color::RED);
/// assert_eq!(canvas.pixel(0, 0), Color::BLACK);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
    /// Pixels written since the last clear
    writes: u64,
}

impl Canvas {
    /// Create an opaque black canvas
    pub fn new(width: usize, height: usize) -> Self {
        let mut canvas = Self {
            image: RgbaImage::new(width as u32, height as u32),
            writes: 0,
        };
        canvas.clear(Color::BLACK);
        canvas
    }

    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// Fill with `color` and reset the write counter
    pub fn clear(&mut self, color: Color) {
        let fill = to_rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
        self.writes = 0;
    }

    /// Overwrite one pixel
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is outside the canvas.
    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.image.put_pixel(x as u32, y as u32, to_rgba(color));
        self.writes += 1;
    }

    /// Color at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let Rgba([r, g, b, a]) = *self.image.get_pixel(x as u32, y as u32);
        Color::rgba(r, g, b, a)
    }

    /// Pixels written since the last clear, overdraw included
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Draw hook for [`Engine`](crate::core::engine::Engine)
    pub fn draw_pixel(x: usize, y: usize, color: Color, canvas: &mut Canvas) {
        canvas.put_pixel(x, y, color);
    }

    /// Underlying image
    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Write the canvas as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| {
                RenderError::Output(format!("Failed to write '{}': {}", path.display(), e))
            })?;

        log::debug!(
            "Saved {}x{} frame to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

#[inline]
fn to_rgba(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}
