//! `.for` scene reader: `.los` content plus `f <ff>` lines that append
//! form-factor values to the most recently read patch.
//!
//! If a patch ends up with fewer `f` lines than `l` lines, the loader
//! right-pads the remainder with `0.0` so `|viewable| == |formFactors|`
//! holds when this function returns.

use crate::common::{for_each_line, parse_f32, parse_patch_geometry};
use crate::error::FormatError;
use radiosity_core::{Color, Patch, PatchId, PatchSet, Point};
use std::path::Path;

pub fn read_for(path: impl AsRef<Path>) -> Result<PatchSet, FormatError> {
    let path = path.as_ref();
    let mut color = Color::BLACK;
    let mut patches: Vec<Patch> = Vec::new();
    let mut viewable_indices: Vec<Vec<usize>> = Vec::new();
    let mut form_factors: Vec<Vec<f32>> = Vec::new();

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
                form_factors.push(Vec::new());
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
            "f" => {
                let value = parse_f32(tokens, 1, "form factor")?;
                form_factors
                    .last_mut()
                    .ok_or_else(|| "`f` line with no preceding `p` line".to_string())?
                    .push(value);
            }
            other => return Err(format!("unrecognized line kind {other:?}")),
        }
        Ok(())
    })?;

    let mut set = PatchSet::new();
    for patch in patches {
        set.push(patch);
    }
    for (owner, targets) in viewable_indices.into_iter().enumerate() {
        for target in targets {
            set.get_mut(PatchId(owner)).add_viewable(PatchId(target));
        }
    }
    for (owner, values) in form_factors.into_iter().enumerate() {
        let patch = set.get_mut(PatchId(owner));
        let viewable_len = patch.viewable().len();
        if values.len() < viewable_len {
            log::warn!(
                "read_for: patch {owner} has {} form factor(s) but {viewable_len} viewable patch(es); padding with zero",
                values.len()
            );
        }
        let mut padded = values;
        padded.resize(viewable_len, 0.0);
        *patch.form_factors_mut() = padded;
    }

    log::debug!("read_for: loaded {} patches from {}", set.len(), path.display());
    Ok(set)
}
