//! Pairwise facing test and viewable-set population.

use crate::patch::{Patch, PatchSet};
use crate::vector::Vector;
use log::debug;

/// Intermediate quantities for the facing test between `p` and `q`: `d1` is
/// the unit vector pointing from `p`'s center toward `q`'s center, projected
/// onto `p`'s own normal; `d2` is the reverse direction projected onto `q`'s
/// normal; `dp` is the two normals' dot product.
struct FacingTerms {
    d1: f32,
    d2: f32,
    dp: f32,
}

fn facing_terms(p: &Patch, q: &Patch) -> FacingTerms {
    let p_to_q = Vector(q.center() - p.center()).normalized();
    let q_to_p = p_to_q.negate();
    FacingTerms {
        d1: p_to_q.dot(&p.normal()),
        d2: q_to_p.dot(&q.normal()),
        dp: p.normal().dot(&q.normal()),
    }
}

/// True if `p` and `q` face each other, per the literal five-clause
/// exclusion disjunction: the pair is mutually visible iff *none* of the
/// clauses holds.
///
/// Kept as five separate clauses rather than collapsing to the equivalent
/// `d1 >= 0.0 && d2 >= 0.0 && dp < 1.0` (clauses 1-4 all imply clause 5, so
/// the enumeration is individually redundant) to keep the case analysis
/// legible; [`is_facing_collapsed`] exists only to prove the two agree.
pub fn is_facing(p: &Patch, q: &Patch) -> bool {
    let FacingTerms { d1, d2, dp } = facing_terms(p, q);

    let clause1 = dp == -1.0 && (d1 < 0.0 || d2 < 0.0);
    let clause2 = dp == 0.0 && d1 < 0.0;
    let clause3 = dp == 1.0;
    let clause4 = (-1.0 < dp && dp < 0.0) && (d1 < 0.0 || d2 < 0.0);
    let clause5 = d1 < 0.0 || d2 < 0.0;

    !(clause1 || clause2 || clause3 || clause4 || clause5)
}

/// The collapsed form clauses 1-4 reduce to. Used only by the equivalence
/// test below.
#[cfg(test)]
fn is_facing_collapsed(p: &Patch, q: &Patch) -> bool {
    let FacingTerms { d1, d2, dp } = facing_terms(p, q);
    d1 >= 0.0 && d2 >= 0.0 && dp < 1.0
}

/// Populate every patch's `viewable` set by testing all unordered pairs.
///
/// O(n^2) over the patch count — no spatial acceleration structure.
/// `is_facing` is symmetric in its two patches (the
/// d1/d2 roles swap but the same five clauses fire either way), so each
/// pair needs exactly one test, and a facing pair is linked in both
/// directions via [`PatchSet::link_viewable`].
pub fn compute_visibility(patches: &mut PatchSet) {
    let n = patches.len();
    let mut linked = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let (pi, pj) = (crate::patch::PatchId(i), crate::patch::PatchId(j));
            if is_facing(patches.get(pi), patches.get(pj)) {
                patches.link_viewable(pi, pj);
                linked += 1;
            }
        }
    }
    debug!("visibility: {linked} facing pairs out of {n} patches");
}
