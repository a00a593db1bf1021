//! Render-ready scene: the mesh plus everything derived from it.

use lumo_core::Mesh;

use crate::{Emitters, Hittable, SceneError, TriangleList};

/// Mesh, intersectable geometry and light sources.
///
/// Built once before rendering and only read afterwards, which is what lets
/// every render thread query it without locking.
pub struct Scene {
    pub mesh: Mesh,
    pub geometry: Box<dyn Hittable>,
    pub emitters: Emitters,
}

impl Scene {
    /// Build the triangle list and the emitters of the mesh.
    ///
    /// Fails if the mesh has no triangles or no emissive triangle.
    pub fn new(mesh: Mesh) -> Result<Self, SceneError> {
        let geometry = TriangleList::new(&mesh)?;
        Self::with_geometry(mesh, Box::new(geometry))
    }

    /// Use a custom acceleration structure for the mesh.
    pub fn with_geometry(mesh: Mesh, geometry: Box<dyn Hittable>) -> Result<Self, SceneError> {
        let emitters = Emitters::new(&mesh)?;
        Ok(Self {
            mesh,
            geometry,
            emitters,
        })
    }
}
