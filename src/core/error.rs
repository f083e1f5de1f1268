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

//! Error types
//!
//! Only recoverable conditions live here: malformed mesh files, unreadable
//! configuration and textures. Contract violations inside the render path
//! (depth buffer index out of range, a triangle with no way to be shaded)
//! panic instead, since they can only come from a caller bug.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, RenderError>;

/// Top-level error for everything outside the per-frame render path
#[derive(Debug, Error)]
pub enum RenderError {
    /// Mesh file could not be loaded
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Render configuration could not be read, parsed or written
    #[error("Config error: {0}")]
    Config(String),

    /// Texture image could not be opened or decoded
    #[error("Texture error: {0}")]
    Texture(String),

    /// Rendered frame could not be encoded or written
    #[error("Output error: {0}")]
    Output(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced while parsing a Wavefront OBJ mesh
///
/// Every parse variant carries the 1-based line number and the raw line so
/// the message points straight at the offending input.
#[derive(Debug, Error)]
pub enum MeshError {
    /// File could not be opened or read
    #[error("Failed to read mesh file: {0}")]
    Io(#[from] std::io::Error),

    /// Wrong number of fields on a `v`, `vt` or `f` line
    #[error("invalid {kind} line: '{content}' in line {line}")]
    FieldCount {
        kind: &'static str,
        line: usize,
        content: String,
    },

    /// A field that should be numeric is not
    #[error("invalid number '{field}' in {kind} line: '{content}' in line {line}")]
    InvalidNumber {
        kind: &'static str,
        field: String,
        line: usize,
        content: String,
    },

    /// A face references a vertex or texture coordinate that does not exist
    #[error("{kind} index {index} out of range (have {available}) in line {line}: '{content}'")]
    IndexOutOfRange {
        kind: &'static str,
        index: i64,
        available: usize,
        line: usize,
        content: String,
    },
}

impl MeshError {
    /// Line number the error was raised on, if it came from parsing
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshError::Io(_) => None,
            MeshError::FieldCount { line, .. }
            | MeshError::InvalidNumber { line, .. }
            | MeshError::IndexOutOfRange { line, .. } => Some(*line),
        }
    }
}
