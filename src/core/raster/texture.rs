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

//! Texture sampling capability

use serde::{Deserialize, Serialize};

use crate::core::geometry::Color;

/// Source of texel colors for textured triangles
///
/// The rasterizer only ever asks for in-range texel coordinates
/// (`0..width`, `0..height`).
pub trait TextureAtlas {
    /// Width in texels
    fn width(&self) -> usize;

    /// Height in texels
    fn height(&self) -> usize;

    /// Color of the texel at `(x, y)`
    fn color_at(&self, x: usize, y: usize) -> Color;
}

impl<T: TextureAtlas + ?Sized> TextureAtlas for Box<T> {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        (**self).color_at(x, y)
    }
}

/// Where texture coordinate `v = 0` lies in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YOrigin {
    /// `v = 0` is the top row (image convention)
    #[default]
    UpperLeft,

    /// `v = 0` is the bottom row (OpenGL and Blender exports)
    LowerLeft,
}

impl YOrigin {
    /// Map a perspective-corrected `v` to a texel row
    ///
    /// Values outside `0.0..=1.0` clamp to the first or last row.
    ///
    /// # Arguments
    ///
    /// * `v` - Texture coordinate in `0.0..=1.0`
    /// * `height` - Texture height in texels
    #[inline]
    pub fn texel_row(self, v: f64, height: usize) -> usize {
        let span = height.saturating_sub(1) as f64;
        let v = match self {
            YOrigin::UpperLeft => v,
            YOrigin::LowerLeft => 1.0 - v,
        };
        ((v * span) as usize).min(height.saturating_sub(1))
    }
}
