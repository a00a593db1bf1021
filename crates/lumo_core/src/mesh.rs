//! Triangle mesh representation.
//!
//! A flat, indexed triangle mesh: every vertex carries a position and a
//! normal, every triangle carries an index into the material table. The
//! renderer builds its intersectable triangles and light sources from it.

use lumo_math::{Aabb, Vec3};

use crate::material::{Material, DEFAULT_MATERIAL};

/// The world-space data of one mesh triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleData {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
    /// Vertex normals matching `a`, `b`, `c`
    pub na: Vec3,
    pub nb: Vec3,
    pub nc: Vec3,
}

impl TriangleData {
    /// Unnormalized geometric normal, `(b - a) x (c - a)`.
    pub fn geometric_normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }

    pub fn area(&self) -> f32 {
        self.geometric_normal().length() / 2.0
    }
}

/// A triangle mesh with per-vertex normals and per-triangle materials.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals, same length as `positions`
    pub normals: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Material index of each triangle
    pub triangle_materials: Vec<u32>,

    /// Material table
    pub materials: Vec<Material>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

impl Default for Mesh {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
            triangle_materials: Vec::new(),
            materials: vec![Material::default()],
            bounds: Aabb::EMPTY,
        }
    }
}

impl Mesh {
    /// Create a mesh with a single default material.
    ///
    /// Smooth normals are computed when `normals` is `None` or doesn't match
    /// the vertex count.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        let triangle_count = indices.len() / 3;
        let bounds = Aabb::enclosing(&positions);
        let normals = match normals {
            Some(normals) if normals.len() == positions.len() => normals,
            Some(normals) => {
                log::debug!(
                    "Normals array length ({}) doesn't match vertex count ({}), computing smooth normals",
                    normals.len(),
                    positions.len()
                );
                smooth_normals(&positions, &indices)
            }
            None => smooth_normals(&positions, &indices),
        };

        Self {
            positions,
            normals,
            indices,
            triangle_materials: vec![0; triangle_count],
            materials: vec![Material::default()],
            bounds,
        }
    }

    /// Replace the material table and the per-triangle assignment.
    pub fn with_materials(mut self, materials: Vec<Material>, triangle_materials: Vec<u32>) -> Self {
        self.materials = materials;
        self.triangle_materials = triangle_materials;
        self
    }

    /// Append a material and return its index.
    pub fn add_material(&mut self, material: Material) -> u32 {
        self.materials.push(material);
        (self.materials.len() - 1) as u32
    }

    /// Append a flat-shaded triangle: three new vertices sharing the face
    /// normal, counter-clockwise winding.
    pub fn push_triangle(&mut self, vertices: [Vec3; 3], material: u32) {
        let base = self.positions.len() as u32;
        let normal = (vertices[1] - vertices[0])
            .cross(vertices[2] - vertices[0])
            .normalize_or_zero();

        for v in vertices {
            self.positions.push(v);
            self.normals.push(normal);
            self.bounds = self.bounds.include(v);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
        self.triangle_materials.push(material);
    }

    /// Append a flat-shaded quad `a b c d` as the triangles `a b c` and `a c d`.
    pub fn push_quad(&mut self, corners: [Vec3; 4], material: u32) {
        let [a, b, c, d] = corners;
        self.push_triangle([a, b, c], material);
        self.push_triangle([a, c, d], material);
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// World-space positions and normals of triangle `id`.
    ///
    /// # Panics
    /// If `id` is out of range or the triangle references a missing vertex.
    pub fn triangle(&self, id: usize) -> TriangleData {
        let i = &self.indices[3 * id..3 * id + 3];
        let (ia, ib, ic) = (i[0] as usize, i[1] as usize, i[2] as usize);

        TriangleData {
            a: self.positions[ia],
            b: self.positions[ib],
            c: self.positions[ic],
            na: self.normals[ia],
            nb: self.normals[ib],
            nc: self.normals[ic],
        }
    }

    /// Material of triangle `id`, the default material when unassigned.
    pub fn triangle_material(&self, id: usize) -> &Material {
        self.triangle_materials
            .get(id)
            .and_then(|&m| self.materials.get(m as usize))
            .unwrap_or(&DEFAULT_MATERIAL)
    }

    /// Iterate over all triangles in index order.
    pub fn triangles(&self) -> impl Iterator<Item = TriangleData> + '_ {
        (0..self.triangle_count()).map(move |id| self.triangle(id))
    }
}

/// Smooth vertex normals: area-weighted average of the adjacent face normals.
///
/// Faces are counter-clockwise (OBJ convention). Vertices touched by no
/// face, or only by degenerate ones, get +Y.
pub fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let vertex_count = positions.len();
    let mut normals = vec![Vec3::ZERO; vertex_count];

    for face in indices.chunks_exact(3) {
        let (i0, i1, i2) = (face[0] as usize, face[1] as usize, face[2] as usize);
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            log::warn!(
                "Invalid triangle indices: [{}, {}, {}], vertex count: {}",
                i0,
                i1,
                i2,
                vertex_count
            );
            continue;
        }

        // Unnormalized cross product weights by area
        let face_normal = (positions[i1] - positions[i0]).cross(positions[i2] - positions[i0]);
        normals[i0] += face_normal;
        normals[i1] += face_normal;
        normals[i2] += face_normal;
    }

    for normal in &mut normals {
        *normal = normal.try_normalize().unwrap_or(Vec3::Y);
    }

    normals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;

    fn unit_triangle() -> Mesh {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        Mesh::new(positions, vec![0, 1, 2], None)
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = unit_triangle();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normals.len(), 3);
        assert_eq!(mesh.triangle_materials, vec![0]);
    }

    #[test]
    fn test_computed_normals_follow_ccw_winding() {
        let mesh = unit_triangle();

        // CCW in the XY plane viewed from +Z
        for normal in &mesh.normals {
            assert!((*normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_mismatched_normals_are_recomputed() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let mesh = Mesh::new(positions, vec![0, 1, 2], Some(vec![Vec3::X]));

        assert_eq!(mesh.normals.len(), 3);
        assert!((mesh.normals[0] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_bounds_computation() {
        let positions = vec![
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let mesh = Mesh::new(positions, vec![0, 1, 2], None);

        assert_eq!(mesh.bounds.min(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(mesh.bounds.max(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_triangle_data() {
        let mesh = unit_triangle();
        let tri = mesh.triangle(0);

        assert_eq!(tri.a, Vec3::ZERO);
        assert_eq!(tri.b, Vec3::X);
        assert_eq!(tri.c, Vec3::Y);
        assert_eq!(tri.area(), 0.5);
        assert_eq!(tri.geometric_normal(), Vec3::Z);
    }

    #[test]
    fn test_push_quad_assigns_material() {
        let mut mesh = Mesh::default();
        let light = mesh.add_material(
            Material::new("light", Color::ONE).with_emission(Color::splat(4.0)),
        );
        mesh.push_quad(
            [
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
            ],
            light,
        );

        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.triangle_material(0).is_emissive());
        assert!(mesh.triangle_material(1).is_emissive());
        // a b c with these corners winds towards -Y
        assert!((mesh.normals[0] + Vec3::Y).length() < 1e-6);
        assert_eq!(mesh.bounds.max(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_unassigned_material_falls_back_to_default() {
        let mesh = unit_triangle().with_materials(Vec::new(), vec![3]);
        assert_eq!(mesh.triangle_material(0), &DEFAULT_MATERIAL);
    }

    #[test]
    fn test_triangles_iterator() {
        let mut mesh = Mesh::default();
        mesh.push_triangle([Vec3::ZERO, Vec3::X, Vec3::Y], 0);
        mesh.push_triangle([Vec3::ZERO, Vec3::Y, Vec3::Z], 0);

        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(triangles.len(), 2);
        assert_eq!(triangles[1].c, Vec3::Z);
    }
}
