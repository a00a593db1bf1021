//! Radiance estimators at a shading point.
//!
//! Both estimators take their random numbers from the caller so that a
//! render worker keeps sole ownership of its generator.

use std::f32::consts::PI;

use lumo_core::Color;
use lumo_math::{Frame, Ray, Vec3};
use rand::Rng;

use crate::{Emitters, Hittable};

/// Offset of occlusion ray origins along the normal.
pub const OCCLUSION_BIAS: f32 = 1e-3;

/// Offset of shadow ray end points along the surface and light normals.
pub const SHADOW_BIAS: f32 = 1e-4;

/// Cosine-weighted direction on the +Z hemisphere for two uniforms in [0, 1).
pub fn cosine_hemisphere(u1: f32, u2: f32) -> Vec3 {
    let phi = 2.0 * PI * u1;
    let r = (1.0 - u2).sqrt();
    Vec3::new(phi.cos() * r, phi.sin() * r, u2.sqrt())
}

/// One-sample ambient occlusion.
///
/// Casts a cosine-distributed ray from `p` around the unit normal `n`,
/// bounded by `max_distance`, and returns `reflectance` when nothing is in
/// the way, black otherwise.
pub fn occlusion(
    reflectance: Color,
    scene: &dyn Hittable,
    u1: f32,
    u2: f32,
    n: Vec3,
    p: Vec3,
    max_distance: f32,
) -> Color {
    let frame = Frame::new(n);
    let direction = frame.to_world(cosine_hemisphere(u1, u2));
    let ray = Ray::new(p + OCCLUSION_BIAS * n, direction).with_tmax(max_distance);

    if scene.visible(&ray) {
        reflectance
    } else {
        Color::ZERO
    }
}

/// Direct lighting from every emitter, one area sample each.
///
/// `n` is the unit shading normal at `p`, already facing the viewer.
/// Emitters light only the side their geometric normal points to. Each
/// emitter contributes the Lambertian term
/// `reflectance / π · cos θp · cos θe / d²` weighted by its emission and
/// divided by `emitter_count · pdf`, so the result is the mean of the
/// per-emitter estimates rather than their sum.
pub fn direct_lighting<R: Rng + ?Sized>(
    reflectance: Color,
    scene: &dyn Hittable,
    emitters: &Emitters,
    n: Vec3,
    p: Vec3,
    rng: &mut R,
) -> Color {
    let count = emitters.len() as f32;
    let mut color = Color::ZERO;

    for emitter in emitters {
        let s = emitter.sample(rng.gen(), rng.gen());

        // Offset along the geometric normal: points behind the emitter are
        // shadowed by the emitter itself
        let shadow = Ray::between(p + SHADOW_BIAS * n, s + SHADOW_BIAS * emitter.normal);
        if !scene.visible(&shadow) {
            continue;
        }

        let mut sn = emitter.normal;
        if sn.dot(p - s) < 0.0 {
            sn = -sn;
        }

        let d = shadow.direction().normalize();
        let cos_p = n.dot(d).max(0.0);
        let cos_e = sn.dot(-d).max(0.0);
        let distance2 = s.distance_squared(p);

        let brdf_cos = reflectance / PI * (cos_p * cos_e) / distance2;
        color += brdf_cos * emitter.emission / (count * emitter.pdf(s));
    }

    color
}
