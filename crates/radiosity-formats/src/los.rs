//! `.los` scene reader: `.pat` content plus `l <patchIndex>` lines that
//! attach viewable-patch indices to the most recently read patch.
//!
//! `l` lines are collected into a parallel per-patch index list while the
//! file is read, then resolved into real viewable-patch links in a second
//! pass once every patch exists, since an `l` line may name a patch that
//! appears later in the file.

use crate::common::{for_each_line, parse_f32, parse_patch_geometry};
use crate::error::FormatError;
use radiosity_core::{Color, Patch, PatchId, PatchSet, Point};
use std::path::Path;

pub fn read_los(path: impl AsRef<Path>) -> Result<PatchSet, FormatError> {
    let path = path.as_ref();
    let mut color = Color::BLACK;
    let mut patches: Vec<Patch> = Vec::new();
    let mut viewable_indices: Vec<Vec<usize>> = Vec::new();

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
                viewable_indices.push(Vec::new());
            }
            "l" => {
                let index: usize = tokens
                    .get(1)
                    .ok_or_else(|| "missing patch index token".to_string())?
                    .parse()
                    .map_err(|_| "could not parse patch index as an integer".to_string())?;
                viewable_indices
                    .last_mut()
                    .ok_or_else(|| "`l` line with no preceding `p` line".to_string())?
                    .push(index);
            }
            other => return Err(format!("unrecognized line kind {other:?}")),
        }
        Ok(())
    })?;

    let mut set = PatchSet::new();
    for patch in patches {
        set.push(patch);
    }
    let mut links = 0usize;
    for (owner, targets) in viewable_indices.into_iter().enumerate() {
        for target in targets {
            set.get_mut(PatchId(owner)).add_viewable(PatchId(target));
            links += 1;
        }
    }

    log::debug!("read_los: loaded {} patches, {links} viewable links, from {}", set.len(), path.display());
    Ok(set)
}
