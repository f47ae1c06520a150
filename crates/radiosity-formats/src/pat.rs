//! `.pat` scene reader: `c`, `p <12 floats><emit>` lines.
//!
//! Unlike `.obj`, a `.pat` file already describes patches directly — no
//! subdivider runs over them, so each patch gets four fresh (non-shared)
//! corner points rather than ones shared with a neighbor.

use crate::common::{for_each_line, parse_f32, parse_patch_geometry};
use crate::error::FormatError;
use radiosity_core::{Color, Patch, Point};
use std::path::Path;

pub fn read_pat(path: impl AsRef<Path>) -> Result<Vec<Patch>, FormatError> {
    let path = path.as_ref();
    let mut color = Color::BLACK;
    let mut patches = Vec::new();

    for_each_line(path, |line| {
        let tokens = &line.tokens;
        match tokens[0] {
            "c" => {
                let r = parse_f32(tokens, 1, "color.r")?;
                let g = parse_f32(tokens, 2, "color.g")?;
                let b = parse_f32(tokens, 3, "color.b")?;
                color = Color::new(r, g, b);
            }
            "p" => {
                let geometry = parse_patch_geometry(&tokens[1..])?;
                let patch = Patch::new(
                    Point::shared(geometry.a),
                    Point::shared(geometry.b),
                    Point::shared(geometry.c),
                    Point::shared(geometry.d),
                    color,
                    geometry.emission,
                );
                patches.push(patch);
            }
            other => return Err(format!("unrecognized line kind {other:?}")),
        }
        Ok(())
    })?;

    log::debug!("read_pat: loaded {} patches from {}", patches.len(), path.display());
    Ok(patches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn single_patch_parses_all_thirteen_fields() {
        let file = write_temp(
            "c 1 0 0\n\
             p 0 0 0  1 0 0  1 1 0  0 1 0  2.5\n",
        );
        let patches = read_pat(file.path()).unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].a.borrow().position, Vec3::ZERO);
        assert_eq!(patches[0].c.borrow().position, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(patches[0].color, Color::new(1.0, 0.0, 0.0));
        // emission field is color * scalar emission (radiosity_core::Patch invariant).
        assert_eq!(patches[0].emission, Color::new(2.5, 0.0, 0.0));
    }

    #[test]
    fn corners_are_not_shared_between_patches() {
        let file = write_temp(
            "c 1 1 1\n\
             p 0 0 0  1 0 0  1 1 0  0 1 0  0\n\
             p 1 0 0  2 0 0  2 1 0  1 1 0  0\n",
        );
        let patches = read_pat(file.path()).unwrap();
        patches[0].b.borrow_mut().update_color(Color::new(1.0, 0.0, 0.0));
        assert_ne!(patches[1].a.borrow().color(), patches[0].b.borrow().color());
    }

    #[test]
    fn missing_emission_field_is_a_parse_error() {
        let file = write_temp("p 0 0 0  1 0 0  1 1 0  0 1 0\n");
        let err = read_pat(file.path()).unwrap_err();
        assert!(matches!(err, FormatError::Parse { .. }));
    }
}
