//! A 3D point with an attached per-vertex color accumulator.
//!
//! Adjacent patches within a quad share the same `Point` (see
//! [`SharedPoint`]) so that the accumulator in [`Point::update_color`]
//! averages contributions from every patch that owns the corner.

use crate::color::Color;
use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// A corner point shared between adjacent patches within a quad.
///
/// `Rc<RefCell<Point>>`: reference-counted because several patches own the
/// same corner, and cell-wrapped because `update_color` mutates through a
/// shared reference. The pipeline is single-threaded end to end, so
/// `Rc`/`RefCell` rather than `Arc`/`Mutex`.
pub type SharedPoint = Rc<RefCell<Point>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vec3,
    color: Color,
    count: u32,
}

impl Point {
    /// A fresh point with no accumulated color (`count` starts at 1).
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Color::BLACK,
            count: 1,
        }
    }

    pub fn shared(position: Vec3) -> SharedPoint {
        Rc::new(RefCell::new(Self::new(position)))
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        self.position.distance(other.position)
    }

    /// Average in the given color. Zero colors are ignored (they are not a
    /// real contribution, just the sentinel default).
    ///
    /// The running average is recomputed and divided by `count` *before*
    /// `count` is incremented, which is not a textbook running mean (it
    /// over-weights later contributions). This is a deliberate contract to
    /// preserve, not a bug to fix silently — see
    /// `divide_before_increment_is_not_a_plain_running_mean` below.
    pub fn update_color(&mut self, color: Color) {
        if color.is_zero() {
            return;
        }
        let weighted = (self.color * self.count as f32) + color;
        self.color = weighted * (1.0 / self.count as f32);
        self.count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_point_has_count_one_and_black_color() {
        let p = Point::new(Vec3::ZERO);
        assert_eq!(p.color(), Color::BLACK);
        assert_eq!(p.count, 1);
    }

    #[test]
    fn zero_color_is_ignored() {
        let mut p = Point::new(Vec3::ZERO);
        p.update_color(Color::BLACK);
        assert_eq!(p.color(), Color::BLACK);
        assert_eq!(p.count, 1);
    }

    #[test]
    fn single_update_sets_color_directly() {
        let mut p = Point::new(Vec3::ZERO);
        p.update_color(Color::new(1.0, 0.0, 0.0));
        assert_eq!(p.color(), Color::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn divide_before_increment_is_not_a_plain_running_mean() {
        // Two updates of the same color: a textbook running mean would
        // still land on that color. This formula instead computes
        // (old*1 + c)/1 = c after update 1, count -> 2; then
        // (c*2 + c)/2 = 1.5c after update 2, count -> 3 — i.e. it is NOT
        // idempotent under repeated identical contributions.
        let mut p = Point::new(Vec3::ZERO);
        let c = Color::new(1.0, 1.0, 1.0);
        p.update_color(c);
        p.update_color(c);
        assert_eq!(p.color(), Color::new(1.5, 1.5, 1.5));
    }

    #[test]
    fn shared_point_accumulates_across_handles() {
        let shared = Point::shared(Vec3::ZERO);
        let a = shared.clone();
        let b = shared.clone();
        a.borrow_mut().update_color(Color::new(1.0, 0.0, 0.0));
        b.borrow_mut().update_color(Color::new(0.0, 1.0, 0.0));
        assert_eq!(shared.borrow().count, 3);
    }
}
