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

//! Wavefront OBJ reader
//!
//! Supports the subset needed for textured meshes:
//!
//! - `v x y z [w]` vertex positions (`w` is accepted and ignored)
//! - `vt u [v [w]]` texture coordinates (`w` is accepted and ignored)
//! - `f` faces with 3 or 4 references of the form `v`, `v/t`, `v/t/n` or
//!   `v//n`; quads are split into `(a, b, c)` and `(a, c, d)`
//!
//! Indices are 1-based; negative indices count back from the most recent
//! element. Normals, groups, materials and other directives are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::MeshError;
use crate::core::geometry::{Mesh, Triangle};
use crate::core::math::{Vector3d, VectorUv};

/// Directives that carry no geometry this renderer uses
const IGNORED_DIRECTIVES: &[&str] = &[
    "vn", "vp", "o", "g", "s", "l", "p", "usemtl", "mtllib", "cstype", "deg", "curv", "surf",
];

/// Load a mesh from a Wavefront OBJ file
///
/// The file is closed on every return path.
///
/// # Arguments
///
/// * `path` - Path to the `.obj` file
///
/// # Returns
///
/// - `Ok(Mesh)` with one triangle per triangular face and two per quad
/// - `Err(MeshError)` for the first unreadable or malformed line
///
/// # Example
///
/// ```no_run
/// use mini3d::core::loader::load_wavefront_obj;
///
/// let mesh = load_wavefront_obj("assets/teapot.obj").unwrap();
/// println!("{} triangles", mesh.len());
/// ```
pub fn load_wavefront_obj(path: impl AsRef<Path>) -> Result<Mesh, MeshError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mesh = parse_wavefront_obj(BufReader::new(file))?;

    log::debug!(
        "Loaded mesh '{}': {} triangles",
        path.display(),
        mesh.len()
    );

    Ok(mesh)
}

/// Parse Wavefront OBJ text from any buffered reader
///
/// # Examples
///
/// ```
/// use mini3d::core::loader::parse_wavefront_obj;
///
/// let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
/// let mesh = parse_wavefront_obj(obj.as_bytes()).unwrap();
/// assert_eq!(mesh.len(), 2);
/// ```
pub fn parse_wavefront_obj<R: BufRead>(reader: R) -> Result<Mesh, MeshError> {
    let mut parser = ObjParser::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        parser.parse_line(index + 1, &line)?;
    }

    log::trace!(
        "Parsed OBJ: {} vertices, {} texture coordinates, {} triangles",
        parser.vertices.len(),
        parser.uvs.len(),
        parser.mesh.len()
    );

    Ok(parser.mesh)
}

/// One face corner: vertex index and optional texture index, both resolved
/// to 0-based positions
#[derive(Debug, Clone, Copy)]
struct FaceRef {
    vertex: usize,
    uv: Option<usize>,
}

/// Accumulated parse state
#[derive(Default)]
struct ObjParser {
    vertices: Vec<Vector3d>,
    uvs: Vec<VectorUv>,
    mesh: Mesh,
}

/// The line being parsed, for error reporting
struct LineContext<'a> {
    number: usize,
    content: &'a str,
}

impl LineContext<'_> {
    fn field_count(&self, kind: &'static str) -> MeshError {
        MeshError::FieldCount {
            kind,
            line: self.number,
            content: self.content.to_string(),
        }
    }

    fn invalid_number(&self, kind: &'static str, field: &str) -> MeshError {
        MeshError::InvalidNumber {
            kind,
            field: field.to_string(),
            line: self.number,
            content: self.content.to_string(),
        }
    }

    fn out_of_range(&self, kind: &'static str, index: i64, available: usize) -> MeshError {
        MeshError::IndexOutOfRange {
            kind,
            index,
            available,
            line: self.number,
            content: self.content.to_string(),
        }
    }

    /// Parse every field as `f64`
    fn floats(&self, kind: &'static str, fields: &[&str]) -> Result<Vec<f64>, MeshError> {
        fields
            .iter()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|_| self.invalid_number(kind, field))
            })
            .collect()
    }
}

impl ObjParser {
    fn parse_line(&mut self, number: usize, raw: &str) -> Result<(), MeshError> {
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            return Ok(());
        }

        let ctx = LineContext { number, content };
        let mut fields = content.split_whitespace();
        let Some(directive) = fields.next() else {
            return Ok(());
        };
        let fields: Vec<&str> = fields.collect();

        match directive {
            "v" => self.parse_vertex(&ctx, &fields),
            "vt" => self.parse_uv(&ctx, &fields),
            "f" => self.parse_face(&ctx, &fields),
            other if IGNORED_DIRECTIVES.contains(&other) => Ok(()),
            other => {
                log::warn!("Skipping unknown OBJ directive '{}' in line {}", other, number);
                Ok(())
            }
        }
    }

    fn parse_vertex(&mut self, ctx: &LineContext<'_>, fields: &[&str]) -> Result<(), MeshError> {
        if !(3..=4).contains(&fields.len()) {
            return Err(ctx.field_count("v"));
        }
        let values = ctx.floats("v", fields)?;
        self.vertices.push(Vector3d::point(values[0], values[1], values[2]));
        Ok(())
    }

    fn parse_uv(&mut self, ctx: &LineContext<'_>, fields: &[&str]) -> Result<(), MeshError> {
        if !(1..=3).contains(&fields.len()) {
            return Err(ctx.field_count("vt"));
        }
        let values = ctx.floats("vt", fields)?;
        let v = values.get(1).copied().unwrap_or(0.0);
        self.uvs.push(VectorUv::new(values[0], v, 1.0));
        Ok(())
    }

    fn parse_face(&mut self, ctx: &LineContext<'_>, fields: &[&str]) -> Result<(), MeshError> {
        if !(3..=4).contains(&fields.len()) {
            return Err(ctx.field_count("f"));
        }

        let refs = fields
            .iter()
            .map(|field| self.parse_face_ref(ctx, field))
            .collect::<Result<Vec<_>, _>>()?;

        let first = self.triangle(refs[0], refs[1], refs[2]);
        self.mesh.add_triangle(first);

        if let Some(&d) = refs.get(3) {
            let second = self.triangle(refs[0], refs[2], d);
            self.mesh.add_triangle(second);
        }
        Ok(())
    }

    /// Parse `v`, `v/t`, `v/t/n` or `v//n`
    fn parse_face_ref(&self, ctx: &LineContext<'_>, field: &str) -> Result<FaceRef, MeshError> {
        let parts: Vec<&str> = field.split('/').collect();
        if parts.len() > 3 {
            return Err(ctx.field_count("f"));
        }

        let vertex = Self::resolve(ctx, "vertex", parts[0], self.vertices.len())?;
        let uv = match parts.get(1) {
            Some(t) if !t.is_empty() => Some(Self::resolve(ctx, "texture", t, self.uvs.len())?),
            _ => None,
        };

        // Normal indices are validated as numbers but otherwise unused
        if let Some(n) = parts.get(2).filter(|n| !n.is_empty()) {
            n.parse::<i64>().map_err(|_| ctx.invalid_number("f", n))?;
        }

        Ok(FaceRef { vertex, uv })
    }

    /// Turn a 1-based (or negative, relative) OBJ index into a 0-based one
    fn resolve(
        ctx: &LineContext<'_>,
        kind: &'static str,
        field: &str,
        available: usize,
    ) -> Result<usize, MeshError> {
        let index: i64 = field.parse().map_err(|_| ctx.invalid_number("f", field))?;

        let resolved = if index > 0 {
            Some(index - 1)
        } else if index < 0 {
            Some(available as i64 + index)
        } else {
            None
        };

        match resolved {
            Some(i) if i >= 0 && (i as usize) < available => Ok(i as usize),
            _ => Err(ctx.out_of_range(kind, index, available)),
        }
    }

    fn triangle(&self, a: FaceRef, b: FaceRef, c: FaceRef) -> Triangle {
        let uv = |r: FaceRef| {
            r.uv
                .map(|i| self.uvs[i])
                .unwrap_or(VectorUv::new(0.0, 0.0, 1.0))
        };
        Triangle::new(
            [
                self.vertices[a.vertex],
                self.vertices[b.vertex],
                self.vertices[c.vertex],
            ],
            [uv(a), uv(b), uv(c)],
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to write OBJ text to a temporary file
    fn create_test_obj_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn parse(content: &str) -> Result<Mesh, MeshError> {
        parse_wavefront_obj(content.as_bytes())
    }

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
";

    // ============================================================================
    // Parsing Tests
    // ============================================================================

    #[test]
    fn test_parse_triangle() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.len(), 1);

        let tri = &mesh.triangles()[0];
        assert_eq!(tri.vertices[1], Vector3d::point(1.0, 0.0, 0.0));
        assert_eq!(tri.color, None);
        assert_eq!(tri.uvs[0], VectorUv::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_quad_splits_on_first_and_third_vertex() {
        let mesh = parse(&format!("{}f 1/1 2/2 3/3 4/4\n", QUAD)).unwrap();
        assert_eq!(mesh.len(), 2);

        let first = &mesh.triangles()[0];
        let second = &mesh.triangles()[1];
        assert_eq!(first.vertices[0], Vector3d::point(0.0, 0.0, 0.0));
        assert_eq!(first.vertices[2], Vector3d::point(1.0, 1.0, 0.0));
        assert_eq!(second.vertices[0], first.vertices[0]);
        assert_eq!(second.vertices[1], first.vertices[2]);
        assert_eq!(second.vertices[2], Vector3d::point(0.0, 1.0, 0.0));

        assert_eq!(second.uvs[1], VectorUv::new(1.0, 1.0, 1.0));
        assert_eq!(second.uvs[2], VectorUv::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_face_reference_forms() {
        let mesh = parse(&format!(
            "{}vn 0 0 1\nf 1/1/1 2/2/1 3/3/1\nf 1//1 3//1 4//1\n",
            QUAD
        ))
        .unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles()[0].uvs[2], VectorUv::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.triangles()[1].uvs[2], VectorUv::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(mesh.triangles()[0].vertices[0], Vector3d::point(0.0, 0.0, 0.0));
        assert_eq!(mesh.triangles()[0].vertices[2], Vector3d::point(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_comments_blank_lines_and_directives_are_skipped() {
        let obj = "\
# exported by hand
mtllib cube.mtl
o Cube

v 0 0 0
v 1 0 0
v 0 1 0
usemtl Material
s off
g side
f 1 2 3
";
        let mesh = parse(obj).unwrap();
        assert_eq!(mesh.len(), 1);
    }

    #[test]
    fn test_optional_w_components() {
        let mesh = parse("v 0 0 0 1\nv 1 0 0 1\nv 0 1 0 1\nvt 0.5 0.25 0\nf 1/1 2/1 3/1\n").unwrap();
        let tri = &mesh.triangles()[0];
        assert_eq!(tri.vertices[1], Vector3d::point(1.0, 0.0, 0.0));
        assert_eq!(tri.uvs[0], VectorUv::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_bounds_follow_loaded_vertices() {
        let mesh = parse("v -1 0 2\nv 3 0 0\nv 0 5 0\nf 1 2 3\n").unwrap();
        assert_eq!(mesh.bounds().min, Vector3d::point(-1.0, 0.0, 0.0));
        assert_eq!(mesh.bounds().max, Vector3d::point(3.0, 5.0, 2.0));
    }

    // ============================================================================
    // Error Tests
    // ============================================================================

    #[test]
    fn test_unparseable_face_index_names_line() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 x 3\n").unwrap_err();
        assert_eq!(err.line(), Some(4));
        assert!(err.to_string().contains("line 4"));
        assert!(err.to_string().contains("f 1 x 3"));
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 4\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                index: 4,
                available: 3,
                line: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_index_is_an_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn test_missing_texture_coordinate_is_an_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/2 3/1\n").unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                kind: "texture",
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_field_counts() {
        let err = parse("v 1 2\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid v line: 'v 1 2' in line 1");

        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, MeshError::FieldCount { kind: "f", line: 3, .. }));

        let err = parse("vt\n").unwrap_err();
        assert!(matches!(err, MeshError::FieldCount { kind: "vt", .. }));

        let err = parse("v 0 0 0\nf 1/1/1/1 1 1\n").unwrap_err();
        assert!(matches!(err, MeshError::FieldCount { kind: "f", .. }));
    }

    #[test]
    fn test_invalid_vertex_number() {
        let err = parse("v 0 zero 0\n").unwrap_err();
        match err {
            MeshError::InvalidNumber { kind, field, line, .. } => {
                assert_eq!(kind, "v");
                assert_eq!(field, "zero");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parsing_stops_at_first_error() {
        let err = parse("v 0 0\nv a b c\n").unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    // ============================================================================
    // File Tests
    // ============================================================================

    #[test]
    fn test_load_from_file() {
        let file = create_test_obj_file(&format!("{}f 1/1 2/2 3/3 4/4\n", QUAD));
        let mesh = load_wavefront_obj(file.path()).unwrap();
        assert_eq!(mesh.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_wavefront_obj("/nonexistent/path/mesh.obj").unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_load_reports_line_from_file() {
        let file = create_test_obj_file("v 0 0 0\n\n# comment\nv 1 1\n");
        let err = load_wavefront_obj(file.path()).unwrap_err();
        assert_eq!(err.line(), Some(4));
    }
}
