//! Camera ray generation.

use lumo_core::{viewport, Orbiter};
use lumo_math::{Mat4, Ray, Vec2, Vec3};

/// Generates primary rays by unprojecting raster positions.
///
/// Holds the inverse of `viewport * projection * view`. Raster space has
/// its origin at the bottom-left corner of the image; image rows are
/// counted from the top, see [`RasterCamera::generate_ray`].
#[derive(Debug, Clone, Copy)]
pub struct RasterCamera {
    pub image_width: u32,
    pub image_height: u32,
    raster_to_world: Mat4,
}

impl RasterCamera {
    pub fn new(view: Mat4, projection: Mat4, image_width: u32, image_height: u32) -> Self {
        let world_to_raster = viewport(image_width, image_height) * projection * view;
        Self {
            image_width,
            image_height,
            raster_to_world: world_to_raster.inverse(),
        }
    }

    pub fn from_orbiter(orbiter: &Orbiter, image_width: u32, image_height: u32) -> Self {
        Self::new(
            orbiter.view(),
            orbiter.projection(image_width, image_height),
            image_width,
            image_height,
        )
    }

    /// World position of a raster point at depth `z` (0 near plane, 1 far plane).
    pub fn unproject(&self, x: f32, y: f32, z: f32) -> Vec3 {
        self.raster_to_world.project_point3(Vec3::new(x, y, z))
    }

    /// Ray through pixel (`px`, `py`), `py` counted from the top row, offset
    /// inside the pixel by `jitter` in [0, 1)².
    ///
    /// The ray runs from the near plane (`t = 0`) to the far plane (`t = 1`).
    /// Pixels outside the image give rays outside the view frustum.
    pub fn generate_ray(&self, px: u32, py: u32, jitter: Vec2) -> Ray {
        let x = px as f32 + jitter.x;
        let y = self.image_height as f32 - 1.0 - py as f32 + jitter.y;

        let origin = self.unproject(x, y, 0.0);
        let end = self.unproject(x, y, 1.0);
        Ray::between(origin, end)
    }
}
