use crate::Vec3;

/// A ray in 3D space with origin, direction and a maximum parameter.
///
/// Valid intersections lie in `[0, tmax]` along the ray. Primary and
/// occlusion rays are unbounded, segment rays built with [`Ray::between`]
/// stop at their end point (`tmax = 1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Direction vector (not necessarily normalized)
    pub direction: Vec3,
    pub tmax: f32,
}

impl Ray {
    /// Create an unbounded ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            tmax: f32::INFINITY,
        }
    }

    /// Create a segment ray from `origin` to `end`.
    ///
    /// The direction is `end - origin` and `tmax` is 1, so `at(1.0)` is the
    /// end point.
    pub fn between(origin: Vec3, end: Vec3) -> Self {
        Self {
            origin,
            direction: end - origin,
            tmax: 1.0,
        }
    }

    /// Bound the ray at `tmax`. Negative values clamp to 0.
    pub fn with_tmax(mut self, tmax: f32) -> Self {
        self.tmax = tmax.max(0.0);
        self
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
