//! Render driver.
//!
//! Rows of the image are rendered in parallel with rayon. Each row owns its
//! slice of the image buffer and its own random generator, so workers never
//! share mutable state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use lumo_core::Color;
use lumo_math::{Ray, Vec2, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::estimator::{direct_lighting, occlusion};
use crate::{RasterCamera, Scene};

/// Which estimates reach the pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Ambient occlusion only
    #[default]
    AmbientOcclusion,
    /// Emission plus direct lighting from the area lights
    Direct,
    /// Ambient occlusion, emission and direct lighting
    Combined,
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel
    pub samples_per_pixel: u32,
    pub integrator: Integrator,
    /// Length of ambient occlusion probes
    pub occlusion_distance: f32,
    /// Fixed seed for reproducible renders, OS entropy when unset
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 1024,
            integrator: Integrator::AmbientOcclusion,
            occlusion_distance: f32::INFINITY,
            seed: None,
        }
    }
}

/// Estimate the radiance carried back along a primary ray.
///
/// Misses are black.
pub fn sample_radiance<R: Rng + ?Sized>(
    ray: &Ray,
    scene: &Scene,
    config: &RenderConfig,
    rng: &mut R,
) -> Color {
    let Some(hit) = scene.geometry.intersect(ray) else {
        return Color::ZERO;
    };

    let triangle = scene.mesh.triangle(hit.triangle_id);
    let material = scene.mesh.triangle_material(hit.triangle_id);
    let p = hit.point_along(ray);

    // Face the normal towards the ray origin
    let mut n = hit.normal(&triangle);
    if n.dot(ray.direction()) > 0.0 {
        n = -n;
    }

    let geometry = scene.geometry.as_ref();
    let mut color = Color::ZERO;

    if config.integrator != Integrator::Direct {
        color += occlusion(
            material.diffuse,
            geometry,
            rng.gen(),
            rng.gen(),
            n,
            p,
            config.occlusion_distance,
        );
    }
    if config.integrator != Integrator::AmbientOcclusion {
        color += material.emission;
        color += direct_lighting(material.diffuse, geometry, &scene.emitters, n, p, rng);
    }

    color
}

/// Render a single pixel with multi-sampling.
///
/// `py` counts rows from the top of the image.
pub fn render_pixel<R: Rng + ?Sized>(
    camera: &RasterCamera,
    scene: &Scene,
    px: u32,
    py: u32,
    config: &RenderConfig,
    rng: &mut R,
) -> Color {
    let weight = 1.0 / config.samples_per_pixel as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let jitter = Vec2::new(rng.gen(), rng.gen());
        let ray = camera.generate_ray(px, py, jitter);
        pixel_color += weight * sample_radiance(&ray, scene, config, rng);
    }

    pixel_color
}

/// Image buffer of linear RGBA colors, row-major, first row at the top.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Convert to RGBA bytes, clamping each channel to [0, 1].
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }
}

/// Convert a linear color to 8-bit RGBA without tone mapping.
pub fn color_to_rgba(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

fn row_rng(seed: Option<u64>, row: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(row as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Render the entire image in parallel.
pub fn render(camera: &RasterCamera, scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let width = image.width as usize;
    let height = image.height as usize;

    log::info!(
        "Rendering {}x{} @ {} spp on {} threads",
        image.width,
        image.height,
        config.samples_per_pixel,
        rayon::current_num_threads()
    );

    let start = Instant::now();
    let rows_done = AtomicUsize::new(0);
    let report_every = (height / 10).max(1);

    image
        .pixels
        .par_chunks_mut(width.max(1))
        .enumerate()
        .for_each(|(py, row)| {
            let mut rng = row_rng(config.seed, py);
            for (px, pixel) in row.iter_mut().enumerate() {
                let color = render_pixel(camera, scene, px as u32, py as u32, config, &mut rng);
                *pixel = color.extend(1.0);
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % report_every == 0 {
                log::debug!("{}/{} rows", done, height);
            }
        });

    let elapsed = start.elapsed();
    log::info!(
        "cpu {}s {:03}ms",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    image
}
