use glam::{Mat4, Vec3};

/// Ordered model-matrix builder.
///
/// Each call post-multiplies the accumulated matrix, so operations apply to
/// the object in reverse call order: `translate(p).rotate_y(a).scale(s)`
/// scales first, then rotates, then moves the result to `p`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform(Mat4);

impl Transform {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    pub fn new() -> Self {
        Self::IDENTITY
    }

    /// Shorthand for `Transform::new().translate(offset)`.
    pub fn at(offset: Vec3) -> Self {
        Self::IDENTITY.translate(offset)
    }

    pub fn translate(self, offset: Vec3) -> Self {
        Self(self.0 * Mat4::from_translation(offset))
    }

    /// Rotation around the world up axis, in degrees.
    pub fn rotate_y(self, degrees: f32) -> Self {
        Self(self.0 * Mat4::from_rotation_y(degrees.to_radians()))
    }

    pub fn scale(self, factors: Vec3) -> Self {
        Self(self.0 * Mat4::from_scale(factors))
    }

    pub fn scale_uniform(self, factor: f32) -> Self {
        self.scale(Vec3::splat(factor))
    }

    pub fn matrix(self) -> Mat4 {
        self.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
