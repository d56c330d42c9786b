use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Per-frame transform of a primitive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
    pub emissive_intensity: f32,
}

impl Transform {
    pub fn new(position: Vec3, rotation: Quat, scale: f32, emissive_intensity: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
            emissive_intensity,
        }
    }

    /// Rotation as XYZ Euler angles
    pub fn euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation, self.position)
    }

    /// Map a point from primitive space to world space
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (local * self.scale)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.rotation.is_finite()
            && self.scale.is_finite()
            && self.emissive_intensity.is_finite()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, 1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn apply_scales_rotates_translates() {
        let t = Transform::new(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_rotation_z(FRAC_PI_2),
            2.0,
            0.0,
        );
        let p = t.apply(Vec3::X);
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn apply_matches_matrix() {
        let t = Transform::new(
            Vec3::new(0.5, -1.0, 2.0),
            Quat::from_euler(EulerRot::XYZ, 0.3, 0.7, -0.2),
            1.3,
            0.0,
        );
        let local = Vec3::new(0.2, 0.4, -0.6);
        let via_matrix = t.matrix().transform_point3(local);
        assert!((t.apply(local) - via_matrix).length() < 1e-5);
    }

    #[test]
    fn euler_round_trips() {
        let angles = Vec3::new(0.2, 0.3, 0.1);
        let t = Transform::new(
            Vec3::ZERO,
            Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z),
            1.0,
            0.0,
        );
        assert!((t.euler() - angles).length() < 1e-5);
    }

    #[test]
    fn nan_is_not_finite() {
        let mut t = Transform::default();
        assert!(t.is_finite());
        t.scale = f32::NAN;
        assert!(!t.is_finite());
    }
}
