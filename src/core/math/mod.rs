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

//! Vector and matrix algebra
//!
//! Pure, stateless math used by every pipeline stage:
//!
//! - [`Vector3d`]: homogeneous 3D vector (X, Y, Z, W)
//! - [`VectorUv`]: texture coordinate with reciprocal-depth scale
//! - [`Matrix4x4`]: row-vector 4x4 transform

mod matrix;
mod vector;

pub use matrix::{Matrix3x2, Matrix3x3, Matrix4x4};
pub use vector::{Vector3d, VectorUv};
