//! Subdivided rectangle, the atom of the light-transport pipeline.

use crate::color::Color;
use crate::point::SharedPoint;
use crate::vector::Vector;
use glam::Vec3;

/// Diffuse reflectance every patch carries unless a caller overrides it at
/// construction.
pub const DEFAULT_REFLECTANCE: f32 = 0.85;

/// A non-owning handle to a patch: an index into a [`PatchSet`]'s backing
/// storage. Used for `viewable` back-references so patches don't need
/// `Rc`/`Weak` cycles to point at their neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatchId(pub usize);

/// A subdivided quadrilateral patch: the unit of energy exchange in the
/// radiosity solve.
pub struct Patch {
    pub a: SharedPoint,
    pub b: SharedPoint,
    pub c: SharedPoint,
    pub d: SharedPoint,
    pub color: Color,
    pub emission: Color,
    pub reflectance: f32,
    normal: Vector,
    center: Vec3,
    area: f32,
    incidence: Color,
    exitance: Color,
    viewable: Vec<PatchId>,
    form_factors: Vec<f32>,
}

impl Patch {
    /// Build a patch from its four corners (shared with neighboring patches
    /// where the grid the subdivider built calls for it), a base color, and
    /// a scalar emission. Reflectance starts at [`DEFAULT_REFLECTANCE`] —
    /// callers that want a different value (`Scene::build` honoring
    /// `RadiosityConfig::reflectance`) assign `patch.reflectance` directly
    /// after construction, since it's a plain public field.
    pub fn new(a: SharedPoint, b: SharedPoint, c: SharedPoint, d: SharedPoint, color: Color, emission: f32) -> Self {
        let reflectance = DEFAULT_REFLECTANCE;
        let (pa, pb, pc) = (a.borrow().position, b.borrow().position, c.borrow().position);

        // normal = (C - B) x (B - A), normalized.
        let bc = Vector(pc - pb);
        let ab = Vector(pb - pa);
        let mut normal = bc.cross(&ab);
        normal.normalize_mut();

        let d_ab = pa.distance(pb);
        let d_bc = pb.distance(pc);
        let area = d_ab * d_bc;

        let mut ac = Vector(pc - pa);
        ac.normalize_mut();
        let dist = (((d_ab / 2.0) * (d_ab / 2.0)) + ((d_bc / 2.0) * (d_bc / 2.0))).sqrt();
        let center = pa + ac.0 * dist;

        let emission_color = color * emission;

        Self {
            a,
            b,
            c,
            d,
            color,
            emission: emission_color,
            reflectance,
            normal,
            center,
            area,
            incidence: Color::BLACK,
            exitance: emission_color,
            viewable: Vec::new(),
            form_factors: Vec::new(),
        }
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn area(&self) -> f32 {
        self.area
    }

    pub fn incidence(&self) -> Color {
        self.incidence
    }

    pub fn exitance(&self) -> Color {
        self.exitance
    }

    pub fn viewable(&self) -> &[PatchId] {
        &self.viewable
    }

    pub fn form_factors(&self) -> &[f32] {
        &self.form_factors
    }

    pub fn form_factors_mut(&mut self) -> &mut Vec<f32> {
        &mut self.form_factors
    }

    /// Record a patch with line of sight to this one, with a zero form
    /// factor slot added in lockstep — this is what keeps
    /// `|viewable| == |formFactors|` a structural invariant rather than one
    /// that has to be checked after the fact.
    pub fn add_viewable(&mut self, other: PatchId) {
        self.viewable.push(other);
        self.form_factors.push(0.0);
    }

    /// Add `form_factor` to the slot for the `index`-th viewable patch (the
    /// hemicube tracer calls this once per hit cell, accumulating).
    pub fn update_form_factor(&mut self, index: usize, form_factor: f32) {
        self.form_factors[index] += form_factor;
    }

    /// Ray/patch intersection used by the hemicube tracer's hit test.
    ///
    /// Returns the signed distance from `origin` to the intersection along
    /// `ray`: `-1.0` if the ray is parallel to the patch's plane, `0.0` if
    /// the plane intersection falls outside the patch's rectangle, and the
    /// (possibly negative) distance otherwise — callers test for a hit with
    /// `> 0.0`.
    pub fn intersect(&self, ray: Vector, origin: Vec3) -> f32 {
        let denom = ray.dot(&self.normal);
        if denom == 0.0 {
            return -1.0;
        }

        let a = self.a.borrow().position;
        let to_plane = Vector(a - origin);
        let mut distance = to_plane.dot(&self.normal) / denom;

        let hit = origin + ray.0 * distance;
        let c = self.c.borrow().position;
        let b = self.b.borrow().position;
        let d = self.d.borrow().position;

        let ci = hit - c;
        let bc = b - c;
        let cd = d - c;
        let ci_bc = ci.dot(bc);
        let ci_cd = ci.dot(cd);

        let inside = (0.0..bc.dot(bc)).contains(&ci_bc) && (0.0..cd.dot(cd)).contains(&ci_cd);
        if !inside {
            distance = 0.0;
        }
        distance
    }

    /// Zero incidence, then accumulate `exitance * form_factor` from every
    /// viewable patch (the Jacobi "gather" half of the solve).
    pub fn gather(&mut self, viewable_exitances: impl Iterator<Item = Color>) {
        self.incidence = Color::BLACK;
        for (exitance, &ff) in viewable_exitances.zip(self.form_factors.iter()) {
            self.incidence += exitance * ff;
        }
    }

    /// Recompute exitance from this pass's incidence (the "scatter" half of
    /// the solve). `color_blending` selects between the componentwise
    /// color-blend variant (the default) and the scalar-reflectance
    /// alternative.
    pub fn scatter(&mut self, color_blending: bool) {
        self.exitance = if color_blending {
            self.incidence * (self.color * self.reflectance) + self.emission
        } else {
            self.incidence * self.reflectance + self.emission
        };
    }

    /// Average `color ⊙ exitance` into every corner point's accumulator.
    pub fn update_corner_colors(&self) {
        let contribution = self.color * self.exitance;
        self.a.borrow_mut().update_color(contribution);
        self.b.borrow_mut().update_color(contribution);
        self.c.borrow_mut().update_color(contribution);
        self.d.borrow_mut().update_color(contribution);
    }
}

/// The owning collection of all patches produced by [`crate::subdivide`],
/// threaded by `&mut` reference through every later pipeline stage.
pub struct PatchSet {
    patches: Vec<Patch>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self { patches: Vec::new() }
    }

    pub fn from_vec(patches: Vec<Patch>) -> Self {
        Self { patches }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    pub fn push(&mut self, patch: Patch) -> PatchId {
        let id = PatchId(self.patches.len());
        self.patches.push(patch);
        id
    }

    pub fn get(&self, id: PatchId) -> &Patch {
        &self.patches[id.0]
    }

    pub fn get_mut(&mut self, id: PatchId) -> &mut Patch {
        &mut self.patches[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = PatchId> {
        (0..self.patches.len()).map(PatchId)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Patch> {
        self.patches.iter_mut()
    }

    /// Borrow two distinct patches mutably at once, by index. Panics if
    /// `i == j`; used by the visibility resolver's `i < j` pair loop.
    pub fn pair_mut(&mut self, i: PatchId, j: PatchId) -> (&mut Patch, &mut Patch) {
        assert_ne!(i.0, j.0, "pair_mut requires distinct patch ids");
        if i.0 < j.0 {
            let (left, right) = self.patches.split_at_mut(j.0);
            (&mut left[i.0], &mut right[0])
        } else {
            let (left, right) = self.patches.split_at_mut(i.0);
            (&mut right[0], &mut left[j.0])
        }
    }

    /// Mutually add two patches to each other's viewable set.
    pub fn link_viewable(&mut self, i: PatchId, j: PatchId) {
        let (p, q) = self.pair_mut(i, j);
        p.add_viewable(j);
        q.add_viewable(i);
    }
}

impl Default for PatchSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    fn unit_patch() -> Patch {
        let a = Point::shared(Vec3::new(0.0, 0.0, 0.0));
        let b = Point::shared(Vec3::new(1.0, 0.0, 0.0));
        let c = Point::shared(Vec3::new(1.0, 1.0, 0.0));
        let d = Point::shared(Vec3::new(0.0, 1.0, 0.0));
        Patch::new(a, b, c, d, Color::new(1.0, 0.0, 0.0), 1.0)
    }

    #[test]
    fn normal_unit_length_and_facing_positive_z() {
        let p = unit_patch();
        assert!((p.normal().length() - 1.0).abs() < 1e-6);
        assert!(p.normal().z() > 0.99);
    }

    #[test]
    fn area_and_center_of_unit_square() {
        let p = unit_patch();
        assert!((p.area() - 1.0).abs() < 1e-5);
        assert!(p.center().distance(Vec3::new(0.5, 0.5, 0.0)) < 1e-5);
    }

    #[test]
    fn exitance_starts_as_emission() {
        let p = unit_patch();
        assert_eq!(p.exitance(), Color::new(1.0, 0.0, 0.0));
        assert_eq!(p.incidence(), Color::BLACK);
    }

    #[test]
    fn add_viewable_keeps_parallel_sequences() {
        let mut p = unit_patch();
        p.add_viewable(PatchId(1));
        p.add_viewable(PatchId(2));
        assert_eq!(p.viewable().len(), p.form_factors().len());
        assert_eq!(p.viewable(), &[PatchId(1), PatchId(2)]);
        assert_eq!(p.form_factors(), &[0.0, 0.0]);
    }

    #[test]
    fn update_form_factor_accumulates() {
        let mut p = unit_patch();
        p.add_viewable(PatchId(1));
        p.update_form_factor(0, 0.1);
        p.update_form_factor(0, 0.2);
        assert!((p.form_factors()[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn intersect_hits_center_along_normal() {
        let p = unit_patch();
        let origin = Vec3::new(0.5, 0.5, 1.0);
        let ray = Vector::new(0.0, 0.0, -1.0);
        let distance = p.intersect(ray, origin);
        assert!((distance - 1.0).abs() < 1e-5);
    }

    #[test]
    fn intersect_misses_off_patch() {
        let p = unit_patch();
        let origin = Vec3::new(5.0, 5.0, 1.0);
        let ray = Vector::new(0.0, 0.0, -1.0);
        assert_eq!(p.intersect(ray, origin), 0.0);
    }

    #[test]
    fn intersect_parallel_returns_negative_one() {
        let p = unit_patch();
        let origin = Vec3::new(0.5, 0.5, 1.0);
        let ray = Vector::new(1.0, 0.0, 0.0);
        assert_eq!(p.intersect(ray, origin), -1.0);
    }

    #[test]
    fn pair_mut_is_order_independent() {
        let mut set = PatchSet::new();
        set.push(unit_patch());
        set.push(unit_patch());
        set.link_viewable(PatchId(0), PatchId(1));
        assert_eq!(set.get(PatchId(0)).viewable(), &[PatchId(1)]);
        assert_eq!(set.get(PatchId(1)).viewable(), &[PatchId(0)]);
    }
}
