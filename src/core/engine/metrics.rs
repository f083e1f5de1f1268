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

//! Per-frame render figures

use std::time::Duration;

use serde::Serialize;

/// Figures recorded by the last call to `render`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Metrics {
    /// Triangles rasterized, counted after clipping
    pub triangles: usize,

    /// Wall-clock time spent in `render`
    pub render_time: Duration,
}

impl Metrics {
    /// Render time in fractional milliseconds
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use mini3d::core::engine::Metrics;
    ///
    /// let metrics = Metrics {
    ///     triangles: 12,
    ///     render_time: Duration::from_millis(250),
    /// };
    /// assert_eq!(metrics.render_time_ms(), 250.0);
    /// ```
    pub fn render_time_ms(&self) -> f64 {
        self.render_time.as_secs_f64() * 1000.0
    }
}
