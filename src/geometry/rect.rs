use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use super::{Point, Size, Vector};

/// An axis-aligned rectangle stored as origin plus (possibly negative) size.
///
/// A rectangle built from a drag can have its origin beyond its far corner; every query
/// normalizes first, so such rectangles behave like their normalized form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub origin: Point,
    pub size: Size,
}

impl Rectangle {
    pub const EMPTY: Self = Self { origin: Point::ORIGIN, size: Size::EMPTY };

    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Rectangle spanning `origin` to `far_corner`, in whatever order they were given.
    pub fn from_corners(origin: Point, far_corner: Point) -> Self {
        Self::new(origin, (far_corner - origin).into())
    }

    /// Zero-sized rectangle at a single point.
    pub fn from_point(point: Point) -> Self {
        Self::new(point, Size::EMPTY)
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn far_corner(&self) -> Point {
        self.origin + Vector::from(self.size)
    }

    pub fn center(&self) -> Point {
        self.origin + Vector::from(self.size) / 2.0
    }

    /// Same area with a non-negative size.
    pub fn normalized(&self) -> Self {
        let far = self.far_corner();
        Self::from_corners(self.origin.min(far), self.origin.max(far))
    }

    /// Inclusive on all edges.
    pub fn contains(&self, point: Point) -> bool {
        let r = self.normalized();
        r.origin.all_le(point) && point.all_le(r.far_corner())
    }

    /// Grows the normalized rectangle by `amount` on every side.
    pub fn inflate(&self, amount: Size) -> Self {
        let r = self.normalized();
        let amount = Vector::from(amount);
        Self::from_corners(r.origin - amount, r.far_corner() + amount)
    }

    pub fn union(&self, other: &Self) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        Self::from_corners(a.origin.min(b.origin), a.far_corner().max(b.far_corner()))
    }

    /// Smallest rectangle covering all of `rects`; `None` if there are none.
    pub fn union_all(rects: impl IntoIterator<Item = Rectangle>) -> Option<Self> {
        rects.into_iter().reduce(|acc, r| acc | r)
    }

    pub fn union_point(&self, point: Point) -> Self {
        let r = self.normalized();
        Self::from_corners(r.origin.min(point), r.far_corner().max(point))
    }
}

impl BitOr for Rectangle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(&rhs)
    }
}

impl BitOr<Point> for Rectangle {
    type Output = Self;

    fn bitor(self, rhs: Point) -> Self {
        self.union_point(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_drag_normalizes() {
        let r = Rectangle::from_corners(Point::new(10.0, 8.0), Point::new(2.0, 4.0));
        let n = r.normalized();
        assert_eq!(n.origin, Point::new(2.0, 4.0));
        assert_eq!(n.size, Size::new(8.0, 4.0));
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(11.0, 5.0)));
    }

    #[test]
    fn inflate_and_union() {
        let r = Rectangle::from_point(Point::new(1.0, 1.0)).inflate(Size::new(0.5, 0.5));
        assert_eq!(r, Rectangle::from_xywh(0.5, 0.5, 1.0, 1.0));

        let u = r | Point::new(3.0, -1.0);
        assert_eq!(u, Rectangle::from_corners(Point::new(0.5, -1.0), Point::new(3.0, 1.5)));

        let both = r | Rectangle::from_xywh(2.0, 2.0, 1.0, 1.0);
        assert_eq!(both.far_corner(), Point::new(3.0, 3.0));
        assert_eq!(both.origin, Point::new(0.5, 0.5));
    }

    #[test]
    fn union_all_of_nothing_is_none() {
        assert_eq!(Rectangle::union_all(Vec::new()), None);
    }
}
