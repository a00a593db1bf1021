//! Lumo Core - scene inputs for the renderer.
//!
//! This crate provides:
//!
//! - **Geometry**: `Mesh`, a flat triangle mesh with per-vertex normals and
//!   per-triangle materials
//! - **Materials**: diffuse reflectance and emission
//! - **OBJ support**: Wavefront OBJ/MTL loading via `tobj`
//! - **Camera**: the `Orbiter` camera description and its transforms
//!
//! # Example
//!
//! ```ignore
//! use lumo_core::{load_obj, Orbiter};
//!
//! let mesh = load_obj("data/cornell.obj")?;
//! let camera = Orbiter::read("data/cornell_orbiter.txt")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod error;
pub mod material;
pub mod mesh;
pub mod obj;
pub mod orbiter;

// Re-export commonly used types
pub use error::{LoadError, LoadResult};
pub use material::{power, Color, Material};
pub use mesh::{Mesh, TriangleData};
pub use obj::load_obj;
pub use orbiter::{viewport, Orbiter};
