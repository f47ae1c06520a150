//! `.obj` scene reader: `e`, `c`, `v`, `f` lines.
//!
//! Emission and color are parser state that apply to every quad emitted
//! after they are last set ("last seen wins"), vertices are 1-indexed and
//! collected into a running list, and each `f` line looks up four
//! already-seen vertices by index and emits one [`Quad`].

use crate::common::{for_each_line, parse_f32, require_token};
use crate::error::FormatError;
use glam::Vec3;
use radiosity_core::{Color, Quad};
use std::path::Path;

pub fn read_obj(path: impl AsRef<Path>) -> Result<Vec<Quad>, FormatError> {
    let path = path.as_ref();
    let mut color = Color::BLACK;
    let mut emission = 0.0f32;
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut quads = Vec::new();

    for_each_line(path, |line| {
        let tokens = &line.tokens;
        match tokens[0] {
            "e" => {
                emission = parse_f32(tokens, 1, "emission")?;
            }
            "c" => {
                let r = parse_f32(tokens, 1, "color.r")?;
                let g = parse_f32(tokens, 2, "color.g")?;
                let b = parse_f32(tokens, 3, "color.b")?;
                color = Color::new(r, g, b);
            }
            "v" => {
                let x = parse_f32(tokens, 1, "vertex.x")?;
                let y = parse_f32(tokens, 2, "vertex.y")?;
                let z = parse_f32(tokens, 3, "vertex.z")?;
                vertices.push(Vec3::new(x, y, z));
            }
            "f" => {
                let a = parse_index(tokens, 1, "face.a")?;
                let b = parse_index(tokens, 2, "face.b")?;
                let c = parse_index(tokens, 3, "face.c")?;
                let d = parse_index(tokens, 4, "face.d")?;
                let lookup = |i: usize| {
                    vertices
                        .get(i)
                        .copied()
                        .ok_or_else(|| format!("vertex index {} out of range (have {})", i + 1, vertices.len()))
                };
                let quad = Quad::new(lookup(a)?, lookup(b)?, lookup(c)?, lookup(d)?, color, emission);
                quads.push(quad);
            }
            other => return Err(format!("unrecognized line kind {other:?}")),
        }
        Ok(())
    })?;

    log::debug!("read_obj: loaded {} quads from {}", quads.len(), path.display());
    Ok(quads)
}

/// Parse a 1-based `.obj` vertex index token into a 0-based array index.
fn parse_index(tokens: &[&str], index: usize, what: &str) -> Result<usize, String> {
    let token = require_token(tokens, index, what)?;
    let one_based: i64 = token
        .parse()
        .map_err(|_| format!("could not parse {what} {token:?} as an integer"))?;
    if one_based < 1 {
        return Err(format!("{what} index {one_based} is not a valid 1-based index"));
    }
    Ok((one_based - 1) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn single_quad_round_trips() {
        let file = write_temp(
            "# a single red quad\n\
             e 1.0\n\
             c 1 0 0\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             f 1 2 3 4\n",
        );
        let quads = read_obj(file.path()).unwrap();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(quads[0].emission, 1.0);
        assert_eq!(quads[0].a, Vec3::ZERO);
        assert_eq!(quads[0].c, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn color_and_emission_persist_across_subsequent_faces() {
        let file = write_temp(
            "e 2.0\n\
             c 0 1 0\n\
             v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             v 0 0 1\n\
             v 1 0 1\n\
             v 1 1 1\n\
             v 0 1 1\n\
             f 1 2 3 4\n\
             f 5 6 7 8\n",
        );
        let quads = read_obj(file.path()).unwrap();
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[1].color, Color::new(0.0, 1.0, 0.0));
        assert_eq!(quads[1].emission, 2.0);
    }

    #[test]
    fn out_of_range_vertex_index_is_a_parse_error() {
        let file = write_temp("v 0 0 0\nf 1 2 3 4\n");
        let err = read_obj(file.path()).unwrap_err();
        assert!(matches!(err, FormatError::Parse { .. }));
    }

    #[test]
    fn unrecognized_line_kind_is_a_parse_error() {
        let file = write_temp("x this is not a real line kind\n");
        let err = read_obj(file.path()).unwrap_err();
        match err {
            FormatError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_obj("/nonexistent/path/scene.obj").unwrap_err();
        assert!(matches!(err, FormatError::Io { .. }));
    }
}
