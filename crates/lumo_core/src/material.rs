//! Diffuse materials with optional emission.

use lumo_math::Vec3;

/// Color type alias (linear RGB, typically 0-1 for reflectance)
pub type Color = Vec3;

/// Scalar power of a color: the mean of its channels.
#[inline]
pub fn power(color: Color) -> f32 {
    (color.x + color.y + color.z) / 3.0
}

/// A diffuse material, optionally emissive.
///
/// Maps to the `Kd` and `Ke` entries of an MTL material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name (from the MTL file)
    pub name: String,

    /// Diffuse reflectance
    pub diffuse: Color,

    /// Emitted radiance, black for non-emitters
    pub emission: Color,
}

/// Grey, non-emissive material used for triangles without one.
pub static DEFAULT_MATERIAL: Material = Material {
    name: String::new(),
    diffuse: Vec3::new(0.8, 0.8, 0.8),
    emission: Vec3::ZERO,
};

impl Default for Material {
    fn default() -> Self {
        DEFAULT_MATERIAL.clone()
    }
}

impl Material {
    /// Create a non-emissive material.
    pub fn new(name: impl Into<String>, diffuse: Color) -> Self {
        Self {
            name: name.into(),
            diffuse,
            emission: Color::ZERO,
        }
    }

    /// Set the emitted radiance.
    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    /// Power of the emitted radiance.
    pub fn emission_power(&self) -> f32 {
        power(self.emission)
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        self.emission_power() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_is_channel_mean() {
        assert_eq!(power(Color::new(3.0, 0.0, 0.0)), 1.0);
        assert_eq!(power(Color::new(1.0, 2.0, 3.0)), 2.0);
        assert_eq!(power(Color::ZERO), 0.0);
    }

    #[test]
    fn test_default_material_is_not_emissive() {
        let material = Material::default();
        assert!(!material.is_emissive());
        assert!(material.name.is_empty());
        assert_eq!(material, DEFAULT_MATERIAL);
    }

    #[test]
    fn test_with_emission() {
        let light = Material::new("light", Color::ONE).with_emission(Color::new(17.0, 12.0, 4.0));

        assert!(light.is_emissive());
        assert_eq!(light.emission_power(), 11.0);
        assert_eq!(light.diffuse, Color::ONE);
    }
}
