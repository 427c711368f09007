use crate::float_types::Real;
use nalgebra::Point2;

/// Axis-aligned box in the layout plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point2<Real>,
    pub maxs: Point2<Real>,
}

/// The chip outline: a `width` × `height` box centered on the origin.
pub type BoardOutline = Aabb;

impl Aabb {
    #[inline]
    pub const fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Box of the given total extent centered on the origin.
    pub fn centered(width: Real, height: Real) -> Self {
        let w = 0.5 * width;
        let h = 0.5 * height;
        Self::new(Point2::new(-w, -h), Point2::new(w, h))
    }

    /// Smallest box holding every point, `None` for an empty slice.
    pub fn from_points(points: &[Point2<Real>]) -> Option<Self> {
        let first = points.first()?;
        let mut aabb = Self::new(*first, *first);
        for p in &points[1..] {
            aabb.mins.x = aabb.mins.x.min(p.x);
            aabb.mins.y = aabb.mins.y.min(p.y);
            aabb.maxs.x = aabb.maxs.x.max(p.x);
            aabb.maxs.y = aabb.maxs.y.max(p.y);
        }
        Some(aabb)
    }

    /// Inclusive containment, points on the boundary are inside.
    #[inline]
    pub fn contains(&self, p: &Point2<Real>) -> bool {
        p.x >= self.mins.x && p.x <= self.maxs.x && p.y >= self.mins.y && p.y <= self.maxs.y
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.maxs.x >= other.mins.x
            && self.mins.x <= other.maxs.x
            && self.maxs.y >= other.mins.y
            && self.mins.y <= other.maxs.y
    }

    /// The four corners, counter-clockwise from the lower left.
    pub fn corners(&self) -> Vec<Point2<Real>> {
        vec![
            Point2::new(self.mins.x, self.mins.y),
            Point2::new(self.maxs.x, self.mins.y),
            Point2::new(self.maxs.x, self.maxs.y),
            Point2::new(self.mins.x, self.maxs.y),
        ]
    }
}
