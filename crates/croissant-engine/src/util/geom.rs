//! Hit-testing and overlap helpers shared by the minigames.

use glam::Vec2;

/// An axis-aligned rectangle in logical canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectArea {
    pub pos: Vec2,
    pub size: Vec2,
}

impl RectArea {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Whether a point lies inside the rectangle (edges inclusive on the
    /// top/left, exclusive on the bottom/right).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x
            && p.y >= self.pos.y
            && p.x < self.pos.x + self.size.x
            && p.y < self.pos.y + self.size.y
    }

    pub fn intersects(&self, other: &RectArea) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Whether two circles overlap.
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) < r * r
}

/// Whether a circle overlaps an axis-aligned rectangle.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &RectArea) -> bool {
    let nearest = center.clamp(rect.pos, rect.pos + rect.size);
    center.distance_squared(nearest) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_edges() {
        let r = RectArea::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(29.9, 29.9)));
        assert!(!r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(9.9, 15.0)));
    }

    #[test]
    fn intersects_overlapping_and_disjoint() {
        let a = RectArea::new(0.0, 0.0, 10.0, 10.0);
        let b = RectArea::new(5.0, 5.0, 10.0, 10.0);
        let c = RectArea::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn circle_overlap() {
        assert!(circles_overlap(
            Vec2::new(0.0, 0.0),
            5.0,
            Vec2::new(8.0, 0.0),
            4.0
        ));
        assert!(!circles_overlap(
            Vec2::new(0.0, 0.0),
            5.0,
            Vec2::new(10.0, 0.0),
            4.0
        ));
    }

    #[test]
    fn circle_rect() {
        let r = RectArea::new(0.0, 0.0, 10.0, 10.0);
        assert!(circle_rect_overlap(Vec2::new(-2.0, 5.0), 3.0, &r));
        assert!(!circle_rect_overlap(Vec2::new(-5.0, 5.0), 3.0, &r));
    }
}
