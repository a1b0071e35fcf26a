//! Rigid 2D transform for placing a clump in the world.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Position plus rotation (radians, counter-clockwise).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub position: Vec2,
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Identity transform.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a translation-only transform.
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create from position and rotation.
    pub fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }

    /// Rotate a direction into world space (no translation).
    pub fn transform_vector(&self, v: Vec2) -> Vec2 {
        Vec2::from_angle(self.rotation).rotate(v)
    }

    /// Local point to world point.
    pub fn transform_point(&self, p: Vec2) -> Vec2 {
        self.position + self.transform_vector(p)
    }

    /// World point to local point.
    pub fn inverse_transform_point(&self, p: Vec2) -> Vec2 {
        Vec2::from_angle(-self.rotation).rotate(p - self.position)
    }

    /// Move by a local-space offset, keeping rotation.
    pub fn translate_local(&mut self, offset: Vec2) {
        self.position += self.transform_vector(offset);
    }

    /// Convert to an affine matrix for renderers.
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_angle_translation(self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_round_trip_with_rotation() {
        let t = Transform2D::new(Vec2::new(3.0, -2.0), 0.7);
        let p = Vec2::new(1.5, 4.0);
        let back = t.inverse_transform_point(t.transform_point(p));
        assert!((back - p).length() < 1e-5);
    }

    #[test]
    fn test_translate_local_follows_rotation() {
        let mut t = Transform2D::new(Vec2::ZERO, std::f32::consts::FRAC_PI_2);
        t.translate_local(Vec2::new(1.0, 0.0));
        assert!((t.position - Vec2::new(0.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_affine_matches_transform_point() {
        let t = Transform2D::new(Vec2::new(1.0, 2.0), 0.3);
        let p = Vec2::new(-2.0, 0.5);
        let via_affine = t.to_affine().transform_point2(p);
        assert!((via_affine - t.transform_point(p)).length() < 1e-5);
    }
}
