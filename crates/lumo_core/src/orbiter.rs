//! Orbiter camera.
//!
//! The camera orbits a center point: it is rotated around the center, then
//! pushed back by `size` and panned by `position`. A camera description file
//! stores one entry per line:
//!
//! ```text
//! c 0 1 0        # center
//! p 0 0 0        # pan offset (a third value is accepted and ignored)
//! r 0 180 0      # rotation around x and y, in degrees
//! s 4.5          # distance to the center
//! f 45 0.1 100   # optional: vertical fov, then optional znear zfar
//! ```
//!
//! Blank lines and `#` comments are ignored.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use lumo_math::{Aabb, Mat4, Vec2, Vec3};

use crate::error::{LoadError, LoadResult};

/// Default vertical field of view, in degrees.
pub const DEFAULT_FOV: f32 = 45.0;

/// Camera orbiting around a center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbiter {
    pub center: Vec3,
    /// Pan offset in view space
    pub position: Vec2,
    /// Rotation around x and y, in degrees
    pub rotation: Vec2,
    /// Distance from the camera to the center, also the scene radius
    pub size: f32,
    /// Vertical field of view, in degrees
    pub fov: f32,
    /// Explicit clip planes, derived from `size` when unset
    pub clip: Option<(f32, f32)>,
}

impl Orbiter {
    pub fn new(center: Vec3, size: f32) -> Self {
        Self {
            center,
            position: Vec2::ZERO,
            rotation: Vec2::ZERO,
            size,
            fov: DEFAULT_FOV,
            clip: None,
        }
    }

    /// Frame a bounding box, looking down -Z at its center.
    pub fn look_at(bounds: &Aabb) -> Self {
        Self::new(bounds.centroid(), bounds.diagonal())
    }

    /// Read a camera description file.
    pub fn read<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        let path = path.as_ref();
        let orbiter: Orbiter = fs::read_to_string(path)?.parse()?;
        log::info!("Loaded camera {}", path.display());
        Ok(orbiter)
    }

    /// World to camera transform.
    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-self.position.x, -self.position.y, -self.size))
            * Mat4::from_rotation_x(self.rotation.x.to_radians())
            * Mat4::from_rotation_y(self.rotation.y.to_radians())
            * Mat4::from_translation(-self.center)
    }

    /// Camera to clip transform (OpenGL depth range) for an image size.
    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        let (znear, zfar) = self.clip_planes();
        Mat4::perspective_rh_gl(
            self.fov.to_radians(),
            width as f32 / height as f32,
            znear,
            zfar,
        )
    }

    /// Clip planes enclosing a sphere of radius `size` around the center.
    pub fn clip_planes(&self) -> (f32, f32) {
        if let Some(clip) = self.clip {
            return clip;
        }
        let distance = Vec3::new(self.position.x, self.position.y, self.size).length();
        (
            (distance - self.size).max(0.1),
            (distance + self.size).max(1.0),
        )
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        self.view().inverse().transform_point3(Vec3::ZERO)
    }
}

/// Normalized device coordinates to pixel coordinates.
///
/// Maps x and y from [-1, 1] to [0, width] and [0, height] (y up) and depth
/// from [-1, 1] to [0, 1].
pub fn viewport(width: u32, height: u32) -> Mat4 {
    let half = Vec3::new(width as f32 / 2.0, height as f32 / 2.0, 0.5);
    Mat4::from_translation(half) * Mat4::from_scale(half)
}

impl FromStr for Orbiter {
    type Err = LoadError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut center = None;
        let mut position = None;
        let mut rotation = None;
        let mut size = None;
        let mut fov = DEFAULT_FOV;
        let mut clip = None;

        for (index, line) in text.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let line_no = index + 1;
            let mut tokens = line.split_whitespace();
            let key = tokens.next().unwrap_or("");
            let values = tokens
                .map(|t| {
                    t.parse::<f32>().map_err(|_| LoadError::OrbiterSyntax {
                        line: line_no,
                        message: format!("invalid number '{}'", t),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let arity = |min: usize, max: usize| {
                if values.len() < min || values.len() > max {
                    Err(LoadError::OrbiterSyntax {
                        line: line_no,
                        message: format!("'{}' expects {} to {} values, got {}", key, min, max, values.len()),
                    })
                } else {
                    Ok(())
                }
            };

            match key {
                "c" => {
                    arity(3, 3)?;
                    center = Some(Vec3::new(values[0], values[1], values[2]));
                }
                "p" => {
                    arity(2, 3)?;
                    position = Some(Vec2::new(values[0], values[1]));
                }
                "r" => {
                    arity(2, 3)?;
                    rotation = Some(Vec2::new(values[0], values[1]));
                }
                "s" => {
                    arity(1, 1)?;
                    size = Some(values[0]);
                }
                "f" => match values.as_slice() {
                    [f] => fov = *f,
                    [f, znear, zfar] => {
                        fov = *f;
                        clip = Some((*znear, *zfar));
                    }
                    _ => {
                        return Err(LoadError::OrbiterSyntax {
                            line: line_no,
                            message: "'f' expects fov, or fov znear zfar".to_string(),
                        })
                    }
                },
                _ => {
                    return Err(LoadError::OrbiterSyntax {
                        line: line_no,
                        message: format!("unknown entry '{}'", key),
                    })
                }
            }
        }

        Ok(Self {
            center: center.ok_or(LoadError::OrbiterMissing("c"))?,
            position: position.ok_or(LoadError::OrbiterMissing("p"))?,
            rotation: rotation.ok_or(LoadError::OrbiterMissing("r"))?,
            size: size.ok_or(LoadError::OrbiterMissing("s"))?,
            fov,
            clip,
        })
    }
}
