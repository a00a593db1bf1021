use crate::{Interval, Vec3};

/// Axis-aligned bounding box, one interval per axis.
///
/// Used for scene bounds (camera framing), not for ray traversal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// An empty box (contains nothing).
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Smallest box containing every point, `EMPTY` for no points.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |bounds, p| bounds.include(*p))
    }

    /// Grow the box so it contains `p`.
    pub fn include(&self, p: Vec3) -> Aabb {
        Aabb {
            x: self.x.include(p.x),
            y: self.y.include(p.y),
            z: self.z.include(p.z),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.min > self.x.max || self.y.min > self.y.max || self.z.min > self.z.max
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f32 {
        (self.max() - self.min()).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 3.0), Vec3::new(0.0, 10.0, -3.0));

        assert_eq!(aabb.min(), Vec3::new(0.0, 0.0, -3.0));
        assert_eq!(aabb.max(), Vec3::new(10.0, 10.0, 3.0));
    }

    #[test]
    fn test_aabb_enclosing() {
        let points = [
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::ZERO,
        ];
        let aabb = Aabb::enclosing(&points);

        assert_eq!(aabb.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(aabb.max(), Vec3::new(4.0, 5.0, 6.0));
        assert!(!aabb.is_empty());
    }

    #[test]
    fn test_aabb_enclosing_nothing_is_empty() {
        let aabb = Aabb::enclosing(&Vec::<Vec3>::new());
        assert!(aabb.is_empty());
    }

    #[test]
    fn test_aabb_centroid_and_diagonal() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 2.0, 1.0));

        assert_eq!(aabb.centroid(), Vec3::new(1.0, 1.0, 0.5));
        assert!((aabb.diagonal() - 3.0).abs() < 1e-6);
    }
}
