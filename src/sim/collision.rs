//! Axis-aligned bounding boxes
//!
//! Every entity in the play area is a rectangle, so catches reduce to a
//! box overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in world space (y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// True if the two boxes share interior area. Touching edges do not count.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::from_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0));
        let b = Aabb::from_center(Vec2::new(110.0, 105.0), Vec2::new(20.0, 20.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_separated_boxes_miss() {
        let a = Aabb::from_center(Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0));
        let b = Aabb::from_center(Vec2::new(100.0, 150.0), Vec2::new(20.0, 20.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contained_box_intersects() {
        let outer = Aabb::from_center(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let inner = Aabb::from_center(Vec2::new(5.0, -5.0), Vec2::new(4.0, 4.0));
        assert!(outer.intersects(&inner));
    }

    #[test]
    fn test_edges() {
        let b = Aabb::from_center(Vec2::new(50.0, 20.0), Vec2::new(10.0, 30.0));
        assert_eq!(b.left(), 45.0);
        assert_eq!(b.right(), 55.0);
        assert_eq!(b.bottom(), 5.0);
        assert_eq!(b.top(), 35.0);
        assert_eq!(b.center(), Vec2::new(50.0, 20.0));
        assert_eq!(b.size(), Vec2::new(10.0, 30.0));
    }
}
