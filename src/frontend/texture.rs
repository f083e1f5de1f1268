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

//! Texture providers
//!
//! [`ImageTexture`] samples a decoded image file; [`CheckerTexture`] is a
//! procedural checkerboard that needs no assets.

use std::path::Path;

use image::RgbaImage;

use crate::core::error::{RenderError, Result};
use crate::core::geometry::Color;
use crate::core::raster::TextureAtlas;

/// Texture backed by an RGBA image
#[derive(Debug, Clone)]
pub struct ImageTexture {
    image: RgbaImage,
}

impl ImageTexture {
    /// Decode an image file (PNG or JPEG)
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the image
    ///
    /// # Returns
    ///
    /// - `Ok(ImageTexture)` on success
    /// - `Err(RenderError::Texture)` if the file cannot be opened or decoded,
    ///   or has no pixels
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|e| RenderError::Texture(format!("Failed to load '{}': {}", path.display(), e)))?
            .to_rgba8();

        let texture = Self::from_image(image)?;
        log::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            texture.width(),
            texture.height()
        );
        Ok(texture)
    }

    /// Wrap an already decoded image
    pub fn from_image(image: RgbaImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RenderError::Texture("texture has no pixels".to_string()));
        }
        Ok(Self { image })
    }
}

impl TextureAtlas for ImageTexture {
    fn width(&self) -> usize {
        self.image.width() as usize
    }

    fn height(&self) -> usize {
        self.image.height() as usize
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        let [r, g, b, a] = self.image.get_pixel(x as u32, y as u32).0;
        Color::rgba(r, g, b, a)
    }
}

/// Procedural two-color checkerboard
///
/// # Examples
///
/// ```
/// use mini3d::core::geometry::Color;
/// use mini3d::core::raster::TextureAtlas;
/// use mini3d::frontend::CheckerTexture;
///
/// let checker = CheckerTexture::new(64, 8, Color::WHITE, Color::BLACK);
/// assert_eq!(checker.color_at(0, 0), Color::WHITE);
/// assert_eq!(checker.color_at(8, 0), Color::BLACK);
/// assert_eq!(checker.color_at(8, 8), Color::WHITE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckerTexture {
    size: usize,
    cell: usize,
    even: Color,
    odd: Color,
}

impl CheckerTexture {
    /// Square `size` x `size` texture with `cell`-texel squares
    ///
    /// Zero sizes are raised to one.
    pub fn new(size: usize, cell: usize, even: Color, odd: Color) -> Self {
        Self {
            size: size.max(1),
            cell: cell.max(1),
            even,
            odd,
        }
    }
}

impl Default for CheckerTexture {
    /// 64x64 texels in 8x8 white and gray squares
    fn default() -> Self {
        Self::new(64, 8, Color::WHITE, Color::rgb(96, 96, 96))
    }
}

impl TextureAtlas for CheckerTexture {
    fn width(&self) -> usize {
        self.size
    }

    fn height(&self) -> usize {
        self.size
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        if (x / self.cell + y / self.cell) % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}
