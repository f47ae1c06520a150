//! Input scene primitive: an axis-aligned-ish quadrilateral.

use crate::color::Color;
use crate::point::Point;
use crate::vector::Vector;
use glam::Vec3;

/// An input quadrilateral with corners `a, b, c, d` in order, a base color,
/// and a scalar emission. Quads are kept for the life of the pipeline;
/// `compute_form_factors` still takes `&[Quad]` for parity with readers that
/// load scenes without going through the subdivider.
#[derive(Debug, Clone)]
pub struct Quad {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    pub d: Vec3,
    pub color: Color,
    pub emission: f32,
    normal: Vector,
}

impl Quad {
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3, color: Color, emission: f32) -> Self {
        let ab = Vector(b - a);
        let ad = Vector(d - a);
        let normal = ad.cross(&ab);
        Self { a, b, c, d, color, emission, normal }
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Ray/plane intersection. Returns the intersection point if the line
    /// `origin + t * direction` hits the plane inside the rectangle, `None`
    /// otherwise. Unlike [`crate::patch::Patch::intersect`], this does not
    /// require `t > 0` — it answers "does this line cross the rectangle" at
    /// all, without regard to ray direction; callers that need a forward-ray
    /// test use `Patch`'s.
    pub fn intersect(&self, direction: Vector, origin: Vec3) -> Option<Vec3> {
        let denom = direction.dot(&self.normal);
        if denom == 0.0 {
            return None;
        }
        let to_plane = Vector(self.a - origin);
        let distance = to_plane.dot(&self.normal) / denom;
        let hit = origin + direction.0 * distance;

        let ci = hit - self.c;
        let bc = self.b - self.c;
        let cd = self.d - self.c;
        let ci_bc = ci.dot(bc);
        let ci_cd = ci.dot(cd);
        if (0.0..bc.dot(bc)).contains(&ci_bc) && (0.0..cd.dot(cd)).contains(&ci_cd) {
            Some(hit)
        } else {
            None
        }
    }

    /// Distance between the `a` and `b` corners.
    pub fn edge_ab_len(&self) -> f32 {
        self.a.distance(self.b)
    }

    /// Distance between the `a` and `d` corners.
    pub fn edge_ad_len(&self) -> f32 {
        self.a.distance(self.d)
    }

    pub fn is_degenerate(&self) -> bool {
        self.edge_ab_len() <= f32::EPSILON || self.edge_ad_len() <= f32::EPSILON
    }
}

/// Convenience constructor taking corner [`Point`]s, used by the `.obj`
/// reader which builds vertices before it has quads.
pub fn quad_from_points(a: &Point, b: &Point, c: &Point, d: &Point, color: Color, emission: f32) -> Quad {
    Quad::new(a.position, b.position, c.position, d.position, color, emission)
}
