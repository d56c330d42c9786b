use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::math::Color;

/// Camera placement; the projection is built per viewport by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 9.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Color,
        intensity: f32,
    },
    Spot {
        position: Vec3,
        target: Vec3,
        /// Cone half-angle in radians
        angle: f32,
        /// Fraction of the cone that fades out, [0, 1]
        penumbra: f32,
        color: Color,
        intensity: f32,
    },
}

impl Light {
    /// Light reaching a surface at `point` facing `normal`
    pub fn contribution(&self, point: Vec3, normal: Vec3) -> Color {
        match *self {
            Light::Ambient { color, intensity } => color.scale(intensity),
            Light::Point {
                position,
                color,
                intensity,
            } => {
                let to_light = (position - point).normalize_or_zero();
                color.scale(intensity * normal.dot(to_light).max(0.0))
            }
            Light::Spot {
                position,
                target,
                angle,
                penumbra,
                color,
                intensity,
            } => {
                let to_light = (position - point).normalize_or_zero();
                let axis = (target - position).normalize_or_zero();
                let cos_outer = angle.cos();
                let cos_inner = (angle * (1.0 - penumbra.clamp(0.0, 1.0))).cos();
                let cos_theta = (-to_light).dot(axis);
                let cone = smoothstep(cos_outer, cos_inner, cos_theta);
                color.scale(intensity * cone * normal.dot(to_light).max(0.0))
            }
        }
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x >= edge0 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear distance fog
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    /// Fog weight at view distance `depth`, 0 = clear, 1 = fully fogged
    pub fn factor(&self, depth: f32) -> f32 {
        if self.far <= self.near {
            return if depth >= self.far { 1.0 } else { 0.0 };
        }
        ((depth - self.near) / (self.far - self.near)).clamp(0.0, 1.0)
    }

    pub fn apply(&self, color: Color, depth: f32) -> Color {
        color.lerp(self.color, self.factor(depth))
    }
}

/// Radial darkening toward the frame edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vignette {
    pub color: Color,
    /// Radius (fraction of the half-diagonal) where darkening starts
    pub inner: f32,
    /// Radius where darkening reaches `strength`
    pub outer: f32,
    pub strength: f32,
}

impl Vignette {
    /// Overlay weight at normalized radius `r`
    pub fn weight(&self, r: f32) -> f32 {
        if self.outer <= self.inner {
            return if r >= self.inner { self.strength } else { 0.0 };
        }
        ((r - self.inner) / (self.outer - self.inner)).clamp(0.0, 1.0) * self.strength
    }
}

/// Everything around the primitives: camera, lights, fog and backdrop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub camera: CameraRig,
    pub lights: Vec<Light>,
    pub fog: Option<Fog>,
    pub background: Color,
    pub vignette: Option<Vignette>,
}

impl Environment {
    /// Total light at `point` for a surface facing `normal`
    pub fn irradiance(&self, point: Vec3, normal: Vec3) -> Color {
        self.lights
            .iter()
            .fold(Color::BLACK, |acc, light| acc.add(light.contribution(point, normal)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::palette;

    #[test]
    fn fog_is_clear_before_near_and_solid_after_far() {
        let fog = Fog {
            color: palette::DARK_900,
            near: 8.0,
            far: 20.0,
        };
        assert_eq!(fog.factor(5.0), 0.0);
        assert_eq!(fog.factor(14.0), 0.5);
        assert_eq!(fog.factor(25.0), 1.0);
        assert_eq!(fog.apply(Color::WHITE, 30.0), palette::DARK_900);
    }

    #[test]
    fn point_light_ignores_back_faces() {
        let light = Light::Point {
            position: Vec3::new(0.0, 0.0, 10.0),
            color: Color::WHITE,
            intensity: 1.0,
        };
        assert_eq!(light.contribution(Vec3::ZERO, Vec3::Z), Color::WHITE);
        assert_eq!(light.contribution(Vec3::ZERO, -Vec3::Z), Color::BLACK);
    }

    #[test]
    fn spot_light_is_dark_outside_cone() {
        let light = Light::Spot {
            position: Vec3::new(0.0, 5.0, 0.0),
            target: Vec3::ZERO,
            angle: 0.3,
            penumbra: 1.0,
            color: Color::WHITE,
            intensity: 1.0,
        };
        let inside = light.contribution(Vec3::ZERO, Vec3::Y);
        let outside = light.contribution(Vec3::new(10.0, 0.0, 0.0), Vec3::Y);
        assert!(inside.r > 0.9);
        assert_eq!(outside, Color::BLACK);
    }

    #[test]
    fn vignette_ramps_between_radii() {
        let v = Vignette {
            color: palette::DARK_900,
            inner: 0.2,
            outer: 0.7,
            strength: 0.3,
        };
        assert_eq!(v.weight(0.1), 0.0);
        assert!((v.weight(0.45) - 0.15).abs() < 1e-6);
        assert_eq!(v.weight(1.0), 0.3);
    }
}
