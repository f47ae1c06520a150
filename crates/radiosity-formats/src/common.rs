//! Shared line-reading and tokenizing plumbing for the four scene-file
//! readers: skip blank/`#`-comment lines, split on whitespace, and report a
//! fatal diagnostic (file, line number, offending text) on a malformed
//! line. Factored out once rather than copied four times, since the four
//! formats share most of their line grammar (`c` and `p` lines are
//! identical across `.pat`/`.los`/`.for`).

use crate::error::FormatError;
use glam::Vec3;
use std::io::BufRead;
use std::path::Path;

/// One non-comment, non-blank line with its 1-based line number and
/// whitespace-split tokens.
pub struct Line<'a> {
    pub number: usize,
    pub tokens: Vec<&'a str>,
}

/// Read `path`, skip blank lines and `#`-comment lines, and invoke
/// `handle` with each remaining line's tokens. `handle` returns `Ok(())` to
/// continue or `Err` to abort with a [`FormatError::Parse`] carrying the
/// file, line number, and original text.
pub fn for_each_line(
    path: &Path,
    mut handle: impl FnMut(Line) -> Result<(), String>,
) -> Result<(), FormatError> {
    let file = std::fs::File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    for (index, line) in reader.lines().enumerate() {
        let text = line.map_err(|source| FormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let number = index + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        handle(Line { number, tokens }).map_err(|reason| FormatError::Parse {
            path: path.to_path_buf(),
            line: number,
            reason,
            text,
        })?;
    }

    Ok(())
}

pub fn require_token<'a>(tokens: &'a [&'a str], index: usize, what: &str) -> Result<&'a str, String> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| format!("missing {what} token"))
}

pub fn parse_f32(tokens: &[&str], index: usize, what: &str) -> Result<f32, String> {
    let token = require_token(tokens, index, what)?;
    token
        .parse::<f32>()
        .map_err(|_| format!("could not parse {what} {token:?} as a float"))
}

pub fn parse_vec3(tokens: &[&str], index: usize, what: &str) -> Result<Vec3, String> {
    Ok(Vec3::new(
        parse_f32(tokens, index, &format!("{what}.x"))?,
        parse_f32(tokens, index + 1, &format!("{what}.y"))?,
        parse_f32(tokens, index + 2, &format!("{what}.z"))?,
    ))
}

/// The shared shape of a `p <12 floats><emit>` line: corners `a, b, c, d`
/// followed by a scalar emission.
pub struct PatchGeometry {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
    pub emission: f32,
}

/// Parse a `p` line's 13 floats (four `Vec3` corners then emission), after
/// the leading `p` token has already been consumed.
pub fn parse_patch_geometry(tokens: &[&str]) -> Result<PatchGeometry, String> {
    Ok(PatchGeometry {
        a: parse_vec3(tokens, 0, "A")?,
        b: parse_vec3(tokens, 3, "B")?,
        c: parse_vec3(tokens, 6, "C")?,
        d: parse_vec3(tokens, 9, "D")?,
        emission: parse_f32(tokens, 12, "emission")?,
    })
}
