//! Hemicube-based form factor estimation.
//!
//! A hemicube is a single precomputed table of per-cell weights for the
//! five faces of a unit-width half-cube placed over a canonical patch at
//! the origin with its own normal as local +z. Exactly one such table is
//! built (per call to [`compute_form_factors`]) and reused for every patch:
//! each patch just supplies its own `(right, up, normal)` basis to rotate
//! the table's local cell directions into world space.

use crate::error::RadiosityError;
use crate::patch::PatchSet;
use crate::quad::Quad;
use crate::vector::Vector;
use glam::Vec3;
use log::trace;

/// One of the five faces of the half-cube sitting on a patch: `Front` is
/// the full-resolution face whose normal equals the patch normal; `Left`,
/// `Right`, `Top`, and `Bottom` are the four half-height faces that fold
/// down from it to the patch's own plane. There is no sixth ("back") face
/// — the hemicube only covers the hemisphere the patch faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Front,
    Left,
    Right,
    Top,
    Bottom,
}

const FACES: [Face; 5] = [Face::Front, Face::Left, Face::Right, Face::Top, Face::Bottom];

fn face_normal_local(face: Face) -> Vec3 {
    match face {
        Face::Front => Vec3::new(0.0, 0.0, 1.0),
        Face::Left => Vec3::new(-1.0, 0.0, 0.0),
        Face::Right => Vec3::new(1.0, 0.0, 0.0),
        Face::Top => Vec3::new(0.0, 1.0, 0.0),
        Face::Bottom => Vec3::new(0.0, -1.0, 0.0),
    }
}

/// Row/column cell counts for a face, given the configured subdivision
/// count `n`. `Front` is the full `(n, n)` face; the four side faces are
/// half-height, `(n, n/2)` for `Left`/`Right` and `(n/2, n)` for
/// `Top`/`Bottom` (same cell count, transposed axes).
fn face_dims(face: Face, n: usize) -> (usize, usize) {
    let half = (n / 2).max(1);
    match face {
        Face::Front => (n, n),
        Face::Left | Face::Right => (n, half),
        Face::Top | Face::Bottom => (half, n),
    }
}

/// The local-frame position of cell `(row, col)` on `face`, in a frame
/// where local `(1,0,0)`/`(0,1,0)`/`(0,0,1)` are the patch's own
/// right/up/normal axes. `Front` spans `x, y in [-0.5, 0.5]` at `z = 0.5`;
/// each side face spans its free horizontal axis in `[-0.5, 0.5]` and
/// height `z in [0, 0.5]`, folding down to the patch's own plane at `z = 0`.
fn cell_point(face: Face, row: usize, col: usize, n: usize) -> Vec3 {
    let half = (n / 2).max(1);
    let full_frac = |i: usize, count: usize| (i as f32 + 0.5) / count as f32 - 0.5;
    let half_frac = |i: usize, count: usize| (i as f32 + 0.5) / count as f32 * 0.5;

    match face {
        Face::Front => Vec3::new(full_frac(col, n), full_frac(row, n), 0.5),
        Face::Left => Vec3::new(-0.5, full_frac(row, n), half_frac(col, half)),
        Face::Right => Vec3::new(0.5, full_frac(row, n), half_frac(col, half)),
        Face::Top => Vec3::new(full_frac(col, n), 0.5, half_frac(row, half)),
        Face::Bottom => Vec3::new(full_frac(col, n), -0.5, half_frac(row, half)),
    }
}

/// Precomputed, normalized weight table: `cells[face_index]` holds every
/// `(row, col)` cell's local ray direction and weight, flattened row-major.
/// All five faces' weights sum to exactly 1 over the whole table.
struct WeightTable {
    cells: Vec<Vec<(Vec3, f32)>>,
}

impl WeightTable {
    fn build(n: usize) -> Self {
        let mut cells = Vec::with_capacity(FACES.len());
        let mut total = 0.0f64;

        for &face in &FACES {
            let (rows, cols) = face_dims(face, n);
            let face_normal = face_normal_local(face);
            let mut grid = Vec::with_capacity(rows * cols);
            for row in 0..rows {
                for col in 0..cols {
                    let point = cell_point(face, row, col, n);
                    let ray = point.normalize();
                    // weight = (ray . faceNormal) * (ray . patchNormal), with
                    // patch normal = local z; the overall normalization
                    // below, not a per-cell area term, is what makes the
                    // table sum to 1.
                    let weight = ray.dot(face_normal) * ray.z;
                    total += weight.max(0.0) as f64;
                    grid.push((ray, weight.max(0.0)));
                }
            }
            cells.push(grid);
        }

        let scale = if total > 0.0 { (1.0 / total) as f32 } else { 1.0 };
        for grid in &mut cells {
            for (_, weight) in grid.iter_mut() {
                *weight *= scale;
            }
        }

        Self { cells }
    }
}

/// Build an orthonormal (right, up) basis for a patch: `right` is the
/// direction from its center to its own `A` corner, and `up = normal x
/// right`.
fn patch_basis(patch: &crate::patch::Patch) -> (Vector, Vector) {
    let center = patch.center();
    let a = patch.a.borrow().position;
    let mut right = Vector(a - center);
    right.normalize_mut();
    let up = patch.normal().cross(&right);
    (right, up)
}

/// Trace every patch's hemicube against its own `viewable` set, accumulating
/// form factors. `patches` must already have gone through
/// [`crate::visibility::compute_visibility`] — a patch with an empty
/// viewable set contributes no form factors and is skipped entirely.
///
/// `quads` is accepted for API parity with callers that load a scene
/// straight from a parser without going through [`crate::subdivide`] (see
/// [`crate::quad::Quad`]'s doc comment) — the trace itself only ever
/// consults `patches`, never `quads`.
pub fn compute_form_factors(
    _quads: &[Quad],
    patches: &mut PatchSet,
    subdivisions: u32,
) -> Result<(), RadiosityError> {
    if subdivisions == 0 {
        return Err(RadiosityError::NumericBreakdown(
            "hemicube subdivision count must be positive".into(),
        ));
    }
    let table = WeightTable::build(subdivisions as usize);

    for id in patches.ids() {
        let viewable = patches.get(id).viewable().to_vec();
        if viewable.is_empty() {
            continue;
        }

        let (right, up) = patch_basis(patches.get(id));
        let normal = patches.get(id).normal();
        let center = patches.get(id).center();
        let origin = center + normal.0 * 1e-4;

        let mut deltas = vec![0.0f32; viewable.len()];

        for face_grid in &table.cells {
            for &(local_dir, weight) in face_grid {
                if weight <= 0.0 {
                    continue;
                }
                let world_dir =
                    Vector(local_dir.x * right.0 + local_dir.y * up.0 + local_dir.z * normal.0);

                // The first viewable patch (in insertion order) whose
                // intersection distance is positive wins the cell — not the
                // geometrically nearest one. The viewable sequence's order
                // is itself the tie-break.
                let hit = viewable
                    .iter()
                    .enumerate()
                    .find(|(_, &other_id)| patches.get(other_id).intersect(world_dir, origin) > 0.0);

                if let Some((idx, _)) = hit {
                    deltas[idx] += weight;
                }
            }
        }

        let viewable_len = viewable.len();
        let patch = patches.get_mut(id);
        for (idx, delta) in deltas.into_iter().enumerate() {
            if delta > 0.0 {
                patch.update_form_factor(idx, delta);
            }
        }
        trace!("patch {:?}: traced against {viewable_len} viewable candidates", id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::patch::Patch;
    use crate::point::Point;

    fn quad_patch(a: Vec3, b: Vec3, c: Vec3, d: Vec3) -> Patch {
        Patch::new(
            Point::shared(a),
            Point::shared(b),
            Point::shared(c),
            Point::shared(d),
            Color::new(1.0, 1.0, 1.0),
            0.0,
        )
    }

    #[test]
    fn weight_table_sums_to_one() {
        let table = WeightTable::build(8);
        let total: f32 = table.cells.iter().flatten().map(|(_, w)| *w).sum();
        assert!((total - 1.0).abs() < 1e-4);
    }

    #[test]
    fn zero_subdivisions_is_rejected() {
        let mut set = PatchSet::new();
        let err = compute_form_factors(&[], &mut set, 0).unwrap_err();
        assert!(matches!(err, RadiosityError::NumericBreakdown(_)));
    }

    #[test]
    fn facing_pair_accumulates_nonzero_form_factor() {
        let mut set = PatchSet::new();
        let floor = quad_patch(
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
        );
        let ceiling = quad_patch(
            Vec3::new(-0.5, -0.5, 1.0),
            Vec3::new(0.5, -0.5, 1.0),
            Vec3::new(0.5, 0.5, 1.0),
            Vec3::new(-0.5, 0.5, 1.0),
        );
        let floor_id = set.push(floor);
        let ceiling_id = set.push(ceiling);
        crate::visibility::compute_visibility(&mut set);
        compute_form_factors(&[], &mut set, 16).unwrap();

        assert_eq!(set.get(floor_id).form_factors().len(), 1);
        assert!(set.get(floor_id).form_factors()[0] > 0.0);
        assert!(set.get(ceiling_id).form_factors()[0] > 0.0);
    }

    #[test]
    fn patch_with_no_viewable_set_is_skipped() {
        let mut set = PatchSet::new();
        set.push(quad_patch(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ));
        compute_form_factors(&[], &mut set, 25).unwrap();
        assert!(set.get(crate::patch::PatchId(0)).form_factors().is_empty());
    }

    #[test]
    fn form_factors_stay_bounded_and_sum_near_one_for_a_closed_pair() {
        // Two unit squares one unit apart, each other's only viewable
        // patch: every hemicube weight that hits anything hits the other
        // patch, so each form factor should land in [0, 1] and its sum
        // over viewable patches (here just the one entry) shouldn't
        // exceed 1 by more than a small numerical tolerance.
        let mut set = PatchSet::new();
        let floor = quad_patch(
            Vec3::new(-0.5, -0.5, 0.0),
            Vec3::new(-0.5, 0.5, 0.0),
            Vec3::new(0.5, 0.5, 0.0),
            Vec3::new(0.5, -0.5, 0.0),
        );
        let ceiling = quad_patch(
            Vec3::new(-0.5, -0.5, 1.0),
            Vec3::new(0.5, -0.5, 1.0),
            Vec3::new(0.5, 0.5, 1.0),
            Vec3::new(-0.5, 0.5, 1.0),
        );
        set.push(floor);
        set.push(ceiling);
        crate::visibility::compute_visibility(&mut set);
        compute_form_factors(&[], &mut set, 25).unwrap();

        for id in set.ids() {
            let patch = set.get(id);
            let sum: f32 = patch.form_factors().iter().sum();
            for &ff in patch.form_factors() {
                assert!((0.0..=1.0).contains(&ff), "form factor {ff} out of bounds");
            }
            assert!(sum <= 1.0 + 1e-3, "form factor sum {sum} exceeds 1 + 1e-3");
        }
    }
}
