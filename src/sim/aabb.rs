//! Axis-aligned bounding boxes
//!
//! Everything in the game world is a rectangle: the player, skunks,
//! platforms, power-ups, the flag zone, tsunami waves. Overlap tests use
//! strict inequalities, so boxes that merely touch edges do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, positioned by its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Build from a top-left position vector and a size
    pub fn from_pos(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Overlap test (strict: shared edges don't count)
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Is the vertical line at `x` inside this box's horizontal span?
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_basic() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        let c = Aabb::new(20.0, 0.0, 5.0, 5.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));

        let below = Aabb::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_edges_and_center() {
        let a = Aabb::new(2.0, 3.0, 4.0, 6.0);
        assert_eq!(a.right(), 6.0);
        assert_eq!(a.bottom(), 9.0);
        assert_eq!(a.center(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_spans_x() {
        let a = Aabb::new(10.0, 0.0, 20.0, 5.0);
        assert!(a.spans_x(15.0));
        assert!(!a.spans_x(10.0)); // boundary excluded
        assert!(!a.spans_x(35.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -500.0_f32..500.0, ay in -500.0_f32..500.0,
            aw in 1.0_f32..100.0, ah in 1.0_f32..100.0,
            bx in -500.0_f32..500.0, by in -500.0_f32..500.0,
            bw in 1.0_f32..100.0, bh in 1.0_f32..100.0,
        ) {
            let a = Aabb::new(ax, ay, aw, ah);
            let b = Aabb::new(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn self_overlap(
            x in -500.0_f32..500.0, y in -500.0_f32..500.0,
            w in 1.0_f32..100.0, h in 1.0_f32..100.0,
        ) {
            let a = Aabb::new(x, y, w, h);
            prop_assert!(a.overlaps(&a));
        }
    }
}
