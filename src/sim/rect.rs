//! Axis-aligned rectangle geometry for sprites and collision
//!
//! A `Rect` is an immutable value: movement replaces the whole rectangle via
//! `translated` rather than mutating coordinates in place, so no two systems
//! ever alias the same live geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from its centre point (ships are placed by centre)
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x: cx - width / 2.0,
            y: cy - height / 2.0,
            width,
            height,
        }
    }

    /// A copy of this rect moved by the given deltas
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Centre point of the rect
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open overlap test: true iff the rects intersect with positive
    /// extent on both axes (edge-touching rects do not overlap)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(36.0, 32.0, 10.0, 10.0);
        assert_eq!(r.x, 31.0);
        assert_eq!(r.y, 27.0);
        assert_eq!(r.center(), Vec2::new(36.0, 32.0));
    }

    #[test]
    fn test_translated_is_replace_on_write() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let moved = r.translated(0.5, -1.0);
        assert_eq!(r.x, 1.0); // original untouched
        assert_eq!(moved.x, 1.5);
        assert_eq!(moved.y, 1.0);
        assert_eq!(moved.width, 3.0);
    }

    #[test]
    fn test_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 2.0, 2.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlaps_edge_touch_is_miss() {
        // Sharing an edge has zero overlap extent
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_overlaps_containment() {
        let outer = Rect::new(0.0, 0.0, 20.0, 20.0);
        let inner = Rect::new(8.0, 8.0, 2.0, 2.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
