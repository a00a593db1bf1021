//! Scene queries: nearest hit and visibility.

use lumo_core::Mesh;
use lumo_math::Ray;

use crate::{Hit, SceneError, Triangle};

/// Geometry that rays can be traced against.
///
/// The estimators only rely on these two queries, so any acceleration
/// structure can stand behind them. Implementations must be safe to query
/// from many render threads at once.
pub trait Hittable: Send + Sync {
    /// Closest intersection within `[0, ray.tmax]`.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// True if nothing intersects the ray within `[0, ray.tmax]`.
    fn visible(&self, ray: &Ray) -> bool;
}

/// Flat list of triangles, queried by linear scan.
///
/// Built once from the mesh and never modified afterwards.
pub struct TriangleList {
    triangles: Vec<Triangle>,
}

impl TriangleList {
    /// Build the list from every triangle of the mesh.
    pub fn new(mesh: &Mesh) -> Result<Self, SceneError> {
        let triangles: Vec<Triangle> = mesh
            .triangles()
            .enumerate()
            .map(|(id, data)| Triangle::from((&data, id)))
            .collect();

        if triangles.is_empty() {
            return Err(SceneError::NoTriangles);
        }

        log::info!("{} triangles", triangles.len());
        Ok(Self { triangles })
    }

    /// Build the list from prepared triangles, in the given order.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Result<Self, SceneError> {
        if triangles.is_empty() {
            return Err(SceneError::NoTriangles);
        }
        Ok(Self { triangles })
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Hittable for TriangleList {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut closest = None;
        let mut tmax = ray.tmax;

        for triangle in &self.triangles {
            if let Some(hit) = triangle.intersect(ray, tmax) {
                tmax = hit.t;
                closest = Some(hit);
            }
        }

        closest
    }

    fn visible(&self, ray: &Ray) -> bool {
        !self
            .triangles
            .iter()
            .any(|triangle| triangle.intersect(ray, ray.tmax).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumo_math::Vec3;

    // Square triangle facing Z at depth z, covering x, y in [-1, 1]
    fn blocker(z: f32, id: usize) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(3.0, -1.0, z),
            Vec3::new(-1.0, 3.0, z),
            id,
        )
    }

    #[test]
    fn test_empty_mesh_is_an_error() {
        assert!(matches!(TriangleList::new(&Mesh::default()), Err(SceneError::NoTriangles)));
        assert!(matches!(TriangleList::from_triangles(Vec::new()), Err(SceneError::NoTriangles)));
    }

    #[test]
    fn test_build_from_mesh_keeps_ids() {
        let mut mesh = Mesh::default();
        mesh.push_triangle([Vec3::ZERO, Vec3::X, Vec3::Y], 0);
        mesh.push_triangle([Vec3::Z, Vec3::X + Vec3::Z, Vec3::Y + Vec3::Z], 0);
        let scene = TriangleList::new(&mesh).unwrap();

        assert_eq!(scene.len(), 2);
        let ray = Ray::new(Vec3::new(0.2, 0.2, 5.0), -Vec3::Z);
        let hit = scene.intersect(&ray).unwrap();
        assert_eq!(hit.triangle_id, 1);
        assert!((hit.t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_hit_regardless_of_order() {
        let near = blocker(-2.0, 0);
        let far = blocker(-5.0, 1);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);

        for triangles in [vec![near, far], vec![far, near]] {
            let scene = TriangleList::from_triangles(triangles).unwrap();
            let hit = scene.intersect(&ray).unwrap();
            assert_eq!(hit.triangle_id, 0);
            assert!((hit.t - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_intersect_respects_tmax() {
        let scene = TriangleList::from_triangles(vec![blocker(-2.0, 0)]).unwrap();

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z).with_tmax(1.5);
        assert!(scene.intersect(&ray).is_none());
        assert!(scene.intersect(&Ray::new(Vec3::ZERO, Vec3::Z)).is_none());
    }

    #[test]
    fn test_visible_with_blocker_between() {
        let scene = TriangleList::from_triangles(vec![blocker(0.0, 0)]).unwrap();
        let below = Vec3::new(0.0, 0.0, -1.0);

        for target_z in [0.5, 1.0, 10.0] {
            let target = Vec3::new(0.1, -0.2, target_z);
            assert!(!scene.visible(&Ray::between(below, target)), "blocked to z={target_z}");
            assert!(!scene.visible(&Ray::between(target, below)), "blocked from z={target_z}");
        }
    }

    #[test]
    fn test_visible_without_blocker_between() {
        let scene = TriangleList::from_triangles(vec![blocker(0.0, 0)]).unwrap();

        // Both endpoints on the same side
        for (from, to) in [
            (Vec3::new(0.0, 0.0, -3.0), Vec3::new(0.5, 0.5, -1.0)),
            (Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.3, 0.1, 4.0)),
        ] {
            assert!(scene.visible(&Ray::between(from, to)));
        }

        // Passing beside the blocker
        let ray = Ray::between(Vec3::new(5.0, 5.0, -1.0), Vec3::new(5.0, 5.0, 1.0));
        assert!(scene.visible(&ray));
    }
}
