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

//! Scene geometry
//!
//! Colors, triangles, meshes and the plane clipper used by the pipeline.

mod clip;
mod color;
mod mesh;
mod shapes;
mod triangle;

pub use clip::{clip_against_plane, ClipPlane, Clipped};
pub use color::Color;
pub use mesh::{BoundingBox, Mesh};
pub use shapes::standard_cube;
pub use triangle::Triangle;
