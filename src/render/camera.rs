use glam::{Mat4, Vec3, Vec4Swizzles};

use crate::core::Viewport;
use crate::scene::CameraRig;

/// A point projected onto the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Physical pixel coordinates, origin top-left
    pub x: f32,
    pub y: f32,
    /// Distance from the camera along its view axis
    pub depth: f32,
}

/// Perspective camera bound to a canvas size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub rig: CameraRig,
    width: u32,
    height: u32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(rig: CameraRig, width: u32, height: u32) -> Self {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        let forward = (rig.target - rig.position).normalize_or_zero();
        let up = if forward.cross(Vec3::Y).length() < 1e-4 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        let view = Mat4::look_at_rh(rig.position, rig.target, up);
        let projection =
            Mat4::perspective_rh(rig.fov_degrees.to_radians(), aspect, rig.near, rig.far);

        Self {
            rig,
            width,
            height,
            view,
            projection,
        }
    }

    pub fn for_viewport(rig: CameraRig, viewport: &Viewport) -> Self {
        Self::new(rig, viewport.physical_width(), viewport.physical_height())
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Depth of a world point along the view axis; negative behind the camera
    pub fn depth(&self, world: Vec3) -> f32 {
        -(self.view.transform_point3(world).z)
    }

    /// Project a world point, or `None` if it lies behind the near plane
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let depth = self.depth(world);
        if depth < self.rig.near || !depth.is_finite() {
            return None;
        }

        let clip = self.projection * self.view * world.extend(1.0);
        let ndc = clip.xyz() / clip.w;

        Some(ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.width as f32,
            y: (1.0 - ndc.y) * 0.5 * self.height as f32,
            depth,
        })
    }

    /// Pixels covered by one world unit at `depth`
    pub fn pixels_per_unit(&self, depth: f32) -> f32 {
        let half_fov = self.rig.fov_degrees.to_radians() * 0.5;
        if depth <= 0.0 {
            return 0.0;
        }
        self.height as f32 / (2.0 * depth * half_fov.tan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(CameraRig::default(), 800, 600)
    }

    #[test]
    fn origin_projects_to_center() {
        let p = camera().project(Vec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
        assert!((p.depth - 9.0).abs() < 1e-4);
    }

    #[test]
    fn up_is_up_on_screen() {
        let p = camera().project(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(p.y < 300.0);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        assert!(camera().project(Vec3::new(0.0, 0.0, 12.0)).is_none());
    }

    #[test]
    fn overhead_rig_keeps_a_finite_view() {
        let rig = CameraRig {
            position: Vec3::new(0.0, 9.0, 0.0),
            ..CameraRig::default()
        };
        let camera = Camera::new(rig, 800, 600);
        assert!(camera.view().is_finite());

        let p = camera.project(Vec3::ZERO).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn unit_size_matches_projection() {
        let camera = camera();
        let a = camera.project(Vec3::ZERO).unwrap();
        let b = camera.project(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        let expected = camera.pixels_per_unit(9.0);
        assert!(((a.y - b.y) - expected).abs() < 1e-2);
    }
}
