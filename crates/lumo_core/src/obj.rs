//! Wavefront OBJ/MTL loading.
//!
//! All models of the file are merged into one `Mesh`. Material 0 of the
//! mesh is the default material, used by faces without `usemtl`; MTL
//! materials follow in file order.

use std::path::Path;

use lumo_math::Vec3;

use crate::error::{LoadError, LoadResult};
use crate::material::{Color, Material};
use crate::mesh::{smooth_normals, Mesh};

/// Load an OBJ file (and its MTL library, when present) into a mesh.
///
/// Faces are triangulated. Models without normals get smooth normals.
/// A missing or broken MTL library is logged and every face falls back to
/// the default material.
pub fn load_obj<P: AsRef<Path>>(path: P) -> LoadResult<Mesh> {
    let path = path.as_ref();
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let materials = match materials {
        Ok(materials) => materials,
        Err(err) => {
            log::warn!("{}: no usable materials ({}), using default", path.display(), err);
            Vec::new()
        }
    };

    let mut table = vec![Material::default()];
    table.extend(materials.iter().map(convert_material));

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();
    let mut triangle_materials = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let base = positions.len() as u32;
        let model_positions: Vec<Vec3> = mesh.positions.chunks_exact(3).map(Vec3::from_slice).collect();

        let model_normals = if mesh.normals.len() == mesh.positions.len() {
            mesh.normals.chunks_exact(3).map(|n| Vec3::from_slice(n).normalize_or_zero()).collect()
        } else {
            log::debug!("Model '{}' has no normals, computing smooth normals", model.name);
            smooth_normals(&model_positions, &mesh.indices)
        };

        // Shift past the default material, unknown ids fall back to it
        let material = mesh
            .material_id
            .filter(|&id| id < materials.len())
            .map_or(0, |id| id as u32 + 1);

        positions.extend(model_positions);
        normals.extend(model_normals);
        indices.extend(mesh.indices.iter().map(|i| base + i));
        triangle_materials.extend(std::iter::repeat(material).take(mesh.indices.len() / 3));
    }

    if indices.is_empty() {
        return Err(LoadError::NoTriangles(path.display().to_string()));
    }

    let mesh = Mesh::new(positions, indices, Some(normals)).with_materials(table, triangle_materials);

    log::info!(
        "Loaded {}: {} triangles, {} vertices, {} materials",
        path.display(),
        mesh.triangle_count(),
        mesh.vertex_count(),
        mesh.materials.len() - 1
    );

    Ok(mesh)
}

fn convert_material(material: &tobj::Material) -> Material {
    let diffuse = material.diffuse.map(Color::from_array).unwrap_or(Color::ZERO);
    // tobj parses `Ke` itself; exporters writing other spellings land in unknown_param
    let emission = material
        .emissive
        .map(Color::from_array)
        .or_else(|| material.unknown_param.get("Ke").and_then(|value| parse_color(value)))
        .unwrap_or(Color::ZERO);

    Material::new(material.name.clone(), diffuse).with_emission(emission)
}

/// Parse an MTL color value: three floats, or one float for grey.
fn parse_color(value: &str) -> Option<Color> {
    let channels = value
        .split_whitespace()
        .map(str::parse::<f32>)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;

    match channels.as_slice() {
        [r, g, b] => Some(Color::new(*r, *g, *b)),
        [grey] => Some(Color::splat(*grey)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lumo_obj_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("1 2 3"), Some(Color::new(1.0, 2.0, 3.0)));
        assert_eq!(parse_color(" 0.5 "), Some(Color::splat(0.5)));
        assert_eq!(parse_color("1 2"), None);
        assert_eq!(parse_color("a b c"), None);
    }

    #[test]
    fn test_load_obj_with_emissive_material() {
        let dir = scratch_dir("emissive");
        fs::write(
            dir.join("scene.mtl"),
            "newmtl white\nKd 0.7 0.7 0.7\n\nnewmtl light\nKd 0 0 0\nKe 17 12 4\n",
        )
        .unwrap();
        fs::write(
            dir.join("scene.obj"),
            "mtllib scene.mtl\n\
             v 0 0 0\nv 1 0 0\nv 1 0 1\nv 0 0 1\n\
             v 0 2 0\nv 1 2 0\nv 1 2 1\n\
             usemtl white\nf 1 4 3 2\n\
             usemtl light\nf 5 6 7\n",
        )
        .unwrap();

        let mesh = load_obj(dir.join("scene.obj")).unwrap();

        // Quad triangulated into two faces plus the light
        assert_eq!(mesh.triangle_count(), 3);
        assert_eq!(mesh.normals.len(), mesh.positions.len());

        let ground = mesh.triangle_material(0);
        assert_eq!(ground.name, "white");
        assert!(!ground.is_emissive());
        assert!((ground.diffuse - Color::splat(0.7)).length() < 1e-6);

        let light = mesh.triangle_material(2);
        assert_eq!(light.name, "light");
        assert_eq!(light.emission, Color::new(17.0, 12.0, 4.0));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_convert_material_reads_emissive() {
        let material = tobj::Material {
            name: "light".to_string(),
            diffuse: Some([0.5, 0.5, 0.5]),
            emissive: Some([17.0, 12.0, 4.0]),
            ..Default::default()
        };

        let converted = convert_material(&material);
        assert_eq!(converted.emission, Color::new(17.0, 12.0, 4.0));
        assert_eq!(converted.diffuse, Color::splat(0.5));
        assert!(converted.is_emissive());
    }

    #[test]
    fn test_convert_material_without_emission_is_black() {
        let material = tobj::Material {
            name: "white".to_string(),
            diffuse: Some([0.7, 0.7, 0.7]),
            ..Default::default()
        };

        assert!(!convert_material(&material).is_emissive());
    }

    #[test]
    fn test_bundled_cornell_box_has_light() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/cornell.obj");
        let mesh = load_obj(path).unwrap();

        let emissive = (0..mesh.triangle_count())
            .filter(|&id| mesh.triangle_material(id).is_emissive())
            .count();
        assert_eq!(emissive, 2);
    }

    #[test]
    fn test_missing_mtl_uses_default_material() {
        let dir = scratch_dir("nomtl");
        fs::write(
            dir.join("tri.obj"),
            "mtllib missing.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        )
        .unwrap();

        let mesh = load_obj(dir.join("tri.obj")).unwrap();

        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangle_material(0), &Material::default());
        assert!((mesh.normals[0] - Vec3::Z).length() < 1e-6);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_empty_obj_is_an_error() {
        let dir = scratch_dir("empty");
        fs::write(dir.join("empty.obj"), "v 0 0 0\n").unwrap();

        let result = load_obj(dir.join("empty.obj"));
        assert!(matches!(result, Err(LoadError::NoTriangles(_))));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_obj("/nonexistent/lumo/scene.obj").is_err());
    }
}
