//! Lumo CPU renderer.
//!
//! Monte Carlo estimation of ambient occlusion and direct lighting from
//! triangular area lights over a triangle mesh, rendered in parallel rows.

mod camera;
mod emitter;
mod error;
pub mod estimator;
mod hittable;
mod output;
mod renderer;
mod scene;
mod triangle;

pub use camera::RasterCamera;
pub use emitter::{Emitter, Emitters};
pub use error::{OutputError, OutputResult, SceneError};
pub use estimator::{cosine_hemisphere, direct_lighting, occlusion};
pub use hittable::{Hittable, TriangleList};
pub use output::{write_hdr, write_png};
pub use renderer::{
    color_to_rgba, render, render_pixel, sample_radiance, ImageBuffer, Integrator, RenderConfig,
};
pub use scene::Scene;
pub use triangle::{Hit, Triangle};

pub use lumo_core::Color;
pub use lumo_math::{Ray, Vec3};
