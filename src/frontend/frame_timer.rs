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

//! Frame pacing and render statistics
//!
//! [`FrameTimer`] paces a render loop to a target frame rate and collects
//! the engine's per-frame [`Metrics`] into a [`FrameStats`] summary.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::core::engine::Metrics;

/// Frame timer for a render loop
///
/// Tracks frame time, FPS and the render work reported by the engine.
///
/// # Example
///
/// ```
/// use mini3d::frontend::FrameTimer;
/// use mini3d::Metrics;
///
/// let mut timer = FrameTimer::unpaced();
///
/// for _ in 0..3 {
///     if timer.should_run_frame() {
///         // Render a frame
///         timer.record(&Metrics::default());
///         timer.tick();
///     }
/// }
/// assert_eq!(timer.frame_count(), 3);
/// ```
pub struct FrameTimer {
    /// Target frame time; zero when unpaced
    target_frame_time: Duration,
    /// Time when the last frame finished
    last_frame: Instant,
    /// Time the timer was created
    started: Instant,
    /// Total number of frames ticked
    frame_count: u64,
    /// Current FPS (frames per second)
    fps: f32,
    /// Last frame time in milliseconds
    frame_time_ms: f32,
    /// Time when FPS calculation started
    fps_start: Instant,
    /// Frames since last FPS calculation
    fps_frame_count: u64,
    /// Frames recorded through `record`
    recorded: u64,
    /// Sum of triangles drawn over recorded frames
    total_triangles: u64,
    /// Most triangles drawn in a single frame
    peak_triangles: usize,
    /// Sum of engine render time over recorded frames
    total_render_time: Duration,
}

impl FrameTimer {
    /// Create a new FrameTimer
    ///
    /// # Arguments
    ///
    /// * `target_fps` - Target frames per second (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `target_fps` is 0
    ///
    /// # Example
    ///
    /// ```
    /// use mini3d::frontend::FrameTimer;
    ///
    /// let timer = FrameTimer::new(60);
    /// assert_eq!(timer.fps(), 0.0); // No frames yet
    /// ```
    pub fn new(target_fps: u32) -> Self {
        assert!(target_fps > 0, "target_fps must be greater than 0");
        Self::with_frame_time(Duration::from_nanos(1_000_000_000 / target_fps as u64))
    }

    /// Timer that never holds a frame back
    pub fn unpaced() -> Self {
        Self::with_frame_time(Duration::ZERO)
    }

    /// Paced timer when a rate is given, unpaced otherwise
    pub fn from_target(target_fps: Option<u32>) -> Self {
        match target_fps {
            Some(fps) if fps > 0 => Self::new(fps),
            _ => Self::unpaced(),
        }
    }

    fn with_frame_time(target_frame_time: Duration) -> Self {
        let now = Instant::now();

        Self {
            target_frame_time,
            last_frame: now,
            started: now,
            frame_count: 0,
            fps: 0.0,
            frame_time_ms: 0.0,
            fps_start: now,
            fps_frame_count: 0,
            recorded: 0,
            total_triangles: 0,
            peak_triangles: 0,
            total_render_time: Duration::ZERO,
        }
    }

    /// Update frame timing after a frame
    ///
    /// FPS is recomputed roughly once per second.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);

        self.frame_time_ms = elapsed.as_secs_f32() * 1000.0;
        self.frame_count += 1;
        self.fps_frame_count += 1;

        let fps_elapsed = now.duration_since(self.fps_start);
        if fps_elapsed >= Duration::from_secs(1) {
            self.fps = self.fps_frame_count as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = 0;
            self.fps_start = now;
        }

        self.last_frame = now;
    }

    /// Add one frame's engine metrics to the running totals
    pub fn record(&mut self, metrics: &Metrics) {
        self.recorded += 1;
        self.total_triangles += metrics.triangles as u64;
        self.peak_triangles = self.peak_triangles.max(metrics.triangles);
        self.total_render_time += metrics.render_time;

        log::trace!(
            "frame {}: {} triangles in {:.3}ms",
            self.recorded,
            metrics.triangles,
            metrics.render_time_ms()
        );
    }

    /// Check if enough time has passed to hold the target frame rate
    #[inline(always)]
    pub fn should_run_frame(&self) -> bool {
        self.last_frame.elapsed() >= self.target_frame_time
    }

    /// Instant at which the next frame is due
    ///
    /// # Example
    ///
    /// ```
    /// use mini3d::frontend::FrameTimer;
    /// use std::time::Instant;
    ///
    /// let timer = FrameTimer::new(60);
    /// assert!(timer.next_frame_instant() >= Instant::now());
    /// ```
    #[inline(always)]
    pub fn next_frame_instant(&self) -> Instant {
        self.last_frame + self.target_frame_time
    }

    /// Sleep until the next frame is due
    pub fn wait_for_next_frame(&self) {
        let now = Instant::now();
        let next = self.next_frame_instant();
        if next > now {
            std::thread::sleep(next - now);
        }
    }

    /// Most recent FPS, updated about once per second
    #[inline(always)]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Time between the last two ticks in milliseconds
    #[inline(always)]
    pub fn frame_time_ms(&self) -> f32 {
        self.frame_time_ms
    }

    /// Total number of frames ticked
    #[inline(always)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Summary of everything recorded so far
    pub fn stats(&self) -> FrameStats {
        let average_render_ms = if self.recorded == 0 {
            0.0
        } else {
            self.total_render_time.as_secs_f64() * 1000.0 / self.recorded as f64
        };

        FrameStats {
            frames: self.recorded,
            total_triangles: self.total_triangles,
            peak_triangles: self.peak_triangles,
            average_render_ms,
            total_render_ms: self.total_render_time.as_secs_f64() * 1000.0,
            wall_time_ms: self.started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Aggregated render statistics, written out as JSON by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    /// Frames recorded
    pub frames: u64,
    /// Triangles drawn across all frames
    pub total_triangles: u64,
    /// Most triangles drawn in one frame
    pub peak_triangles: usize,
    /// Mean engine render time per frame
    pub average_render_ms: f64,
    /// Engine render time across all frames
    pub total_render_ms: f64,
    /// Wall-clock time since the timer was created
    pub wall_time_ms: f64,
}
