//! Intersectable triangle and ray hits.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection
//! ("Fast, Minimum Storage Ray/Triangle Intersection", 1997).

use lumo_core::TriangleData;
use lumo_math::{Interval, Ray, Vec3};

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A ray/triangle intersection.
///
/// Barycentric convention: `p(u, v) = (1 - u - v) * a + u * b + v * c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the mesh triangle that was hit
    pub triangle_id: usize,
    /// Parameter along the ray
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

impl Hit {
    /// Interpolated shading normal (unit length).
    pub fn normal(&self, triangle: &TriangleData) -> Vec3 {
        let w = 1.0 - self.u - self.v;
        (w * triangle.na + self.u * triangle.nb + self.v * triangle.nc).normalize()
    }

    /// Hit position from the barycentric blend of the vertices.
    pub fn point_on(&self, triangle: &TriangleData) -> Vec3 {
        let w = 1.0 - self.u - self.v;
        w * triangle.a + self.u * triangle.b + self.v * triangle.c
    }

    /// Hit position along the ray, `origin + t * direction`.
    #[inline]
    pub fn point_along(&self, ray: &Ray) -> Vec3 {
        ray.at(self.t)
    }
}

/// A triangle prepared for intersection: anchor vertex and two edges.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    p: Vec3,
    e1: Vec3,
    e2: Vec3,
    /// Source triangle in the mesh
    id: usize,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, id: usize) -> Self {
        Self {
            p: a,
            e1: b - a,
            e2: c - a,
            id,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Intersect the ray within `[0, tmax]`.
    ///
    /// Returns `None` when the ray misses, is parallel to the triangle, or
    /// the intersection lies outside the interval.
    pub fn intersect(&self, ray: &Ray, tmax: f32) -> Option<Hit> {
        let pvec = ray.direction().cross(self.e2);
        let det = self.e1.dot(pvec);

        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let tvec = ray.origin() - self.p;

        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(self.e1);
        let v = ray.direction().dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = self.e2.dot(qvec) * inv_det;
        if !Interval::new(0.0, tmax).contains(t) {
            return None;
        }

        Some(Hit {
            triangle_id: self.id,
            t,
            u,
            v,
        })
    }
}

impl From<(&TriangleData, usize)> for Triangle {
    fn from((data, id): (&TriangleData, usize)) -> Self {
        Triangle::new(data.a, data.b, data.c, id)
    }
}
