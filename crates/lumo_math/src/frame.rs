use crate::Vec3;

/// Orthonormal frame `{t, b, n}` built from a single unit normal.
///
/// Uses the branchless construction from "Building an Orthonormal Basis,
/// Revisited" (Duff et al., JCGT 2017), which stays stable for normals close
/// to both poles. The frame is right-handed: `t × b = n`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub t: Vec3,
    pub b: Vec3,
    pub n: Vec3,
}

impl Frame {
    /// Build a frame around `n`, which must be unit length.
    pub fn new(n: Vec3) -> Self {
        let sign = 1.0_f32.copysign(n.z);
        let a = -1.0 / (sign + n.z);
        let d = n.x * n.y * a;
        let t = Vec3::new(1.0 + sign * n.x * n.x * a, sign * d, -sign * n.x);
        let b = Vec3::new(d, sign + n.y * n.y * a, -n.y);

        Self { t, b, n }
    }

    /// Local direction (z along the normal) to world space.
    #[inline]
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        local.x * self.t + local.y * self.b + local.z * self.n
    }

    /// World direction to local coordinates.
    #[inline]
    pub fn to_local(&self, world: Vec3) -> Vec3 {
        Vec3::new(world.dot(self.t), world.dot(self.b), world.dot(self.n))
    }
}
