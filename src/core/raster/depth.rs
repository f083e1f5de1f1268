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

//! Per-pixel depth buffer

/// Reciprocal-depth buffer, one `f64` per pixel in row-major order
///
/// Stored values are interpolated `1/w`, so larger means nearer. A cleared
/// buffer holds zero everywhere, which any visible fragment beats.
///
/// # Panics
///
/// [`at`](Self::at) and [`set`](Self::set) panic when the coordinate lies
/// outside the buffer. The pipeline clips to the viewport first, so an
/// out-of-range access is a bug rather than bad input.
///
/// # Examples
///
/// ```
/// use mini3d::core::raster::DepthBuffer;
///
/// let mut depth = DepthBuffer::new(4, 4);
/// assert_eq!(depth.at(3, 2), 0.0);
///
/// depth.set(3, 2, 0.5);
/// assert_eq!(depth.at(3, 2), 0.5);
///
/// depth.clear();
/// assert_eq!(depth.at(3, 2), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    entries: Vec<f64>,
    width: usize,
    height: usize,
}

impl DepthBuffer {
    /// Allocate a cleared buffer of exactly `width * height` entries
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            entries: vec![0.0; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every entry to zero (infinitely far)
    pub fn clear(&mut self) {
        self.entries.fill(0.0);
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "depth buffer access ({}, {}) outside {}x{}",
            x,
            y,
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// Stored value at `(x, y)`
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.entries[self.index(x, y)]
    }

    /// Overwrite the value at `(x, y)`
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        let index = self.index(x, y);
        self.entries[index] = value;
    }
}
