//! Triangular area lights.

use lumo_core::{power, Color, Mesh, TriangleData};
use lumo_math::Vec3;

use crate::SceneError;

/// An emissive triangle.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    /// Emitted radiance, constant over the triangle
    pub emission: Color,
    /// Unit geometric normal, `(b - a) x (c - a)`
    pub normal: Vec3,
    pub area: f32,
}

impl Emitter {
    pub fn new(triangle: &TriangleData, emission: Color) -> Self {
        let ng = triangle.geometric_normal();
        Self {
            a: triangle.a,
            b: triangle.b,
            c: triangle.c,
            emission,
            normal: ng.normalize(),
            area: ng.length() / 2.0,
        }
    }

    /// Map two uniform numbers in [0, 1) to a point on the triangle,
    /// uniformly distributed over its area.
    ///
    /// See the Global Illumination Compendium, eq. 18.
    pub fn sample(&self, u1: f32, u2: f32) -> Vec3 {
        let r1 = u1.sqrt();
        let alpha = 1.0 - r1;
        let beta = (1.0 - u2) * r1;
        let gamma = u2 * r1;
        alpha * self.a + beta * self.b + gamma * self.c
    }

    /// Area density of [`sample`](Self::sample).
    ///
    /// Constant over the triangle. Points outside the triangle are not
    /// detected and get the same value.
    pub fn pdf(&self, _point: Vec3) -> f32 {
        1.0 / self.area
    }
}

/// All emitters of a scene with their aggregated area and power.
#[derive(Debug, Clone)]
pub struct Emitters {
    emitters: Vec<Emitter>,
    /// Sum of `area * power(emission)`
    pub total_emission: f32,
    /// Sum of emitter areas
    pub total_area: f32,
}

impl Emitters {
    /// Collect every mesh triangle whose material emits light.
    pub fn new(mesh: &Mesh) -> Result<Self, SceneError> {
        let emitters = (0..mesh.triangle_count())
            .filter_map(|id| {
                let material = mesh.triangle_material(id);
                material
                    .is_emissive()
                    .then(|| Emitter::new(&mesh.triangle(id), material.emission))
            })
            .collect();

        let emitters = Self::from_emitters(emitters)?;
        log::info!(
            "{} emitters, total area {:.3}, total emission {:.3}",
            emitters.len(),
            emitters.total_area,
            emitters.total_emission
        );
        Ok(emitters)
    }

    /// Aggregate prepared emitters.
    pub fn from_emitters(emitters: Vec<Emitter>) -> Result<Self, SceneError> {
        if emitters.is_empty() {
            return Err(SceneError::NoEmitters);
        }

        let mut total_emission = 0.0;
        let mut total_area = 0.0;
        for emitter in &emitters {
            if emitter.area <= 0.0 {
                log::warn!("Degenerate emitter at {} has zero area", emitter.a);
            }
            total_emission += emitter.area * power(emitter.emission);
            total_area += emitter.area;
        }

        Ok(Self {
            emitters,
            total_emission,
            total_area,
        })
    }

    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Emitter> {
        self.emitters.iter()
    }
}

impl<'a> IntoIterator for &'a Emitters {
    type Item = &'a Emitter;
    type IntoIter = std::slice::Iter<'a, Emitter>;

    fn into_iter(self) -> Self::IntoIter {
        self.emitters.iter()
    }
}
