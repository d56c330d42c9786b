use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::primitive::Primitive;
use super::transform::Transform;
use crate::math::Wave;

/// Floating wrapper: slow wobble and vertical bob around the scene origin
///
/// With `s = (t + offset) / 4 * speed` the wrapper rotates by
/// `(cos s / 8, sin s / 8, sin s / 20) * rotation_intensity` and lifts by
/// `sin s / 10 * float_intensity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Float {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    /// Time offset, drawn once per wrapper
    pub offset: f32,
}

impl Float {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32, offset: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            offset,
        }
    }

    /// Wrapper rotation and vertical lift at time `t`
    pub fn evaluate(&self, t: f32) -> (Quat, f32) {
        let s = (t + self.offset) / 4.0 * self.speed;
        let (sin, cos) = s.sin_cos();
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            cos / 8.0 * self.rotation_intensity,
            sin / 8.0 * self.rotation_intensity,
            sin / 20.0 * self.rotation_intensity,
        );
        (rotation, sin / 10.0 * self.float_intensity)
    }

    /// Largest vertical displacement the wrapper produces
    pub fn max_lift(&self) -> f32 {
        self.float_intensity.abs() / 10.0
    }
}

/// Per-point shimmer: each axis oscillates at `speed` with a phase derived
/// from the base position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    pub amplitude: f32,
    pub speed: f32,
    pub noise: f32,
}

impl Drift {
    pub fn offset(&self, base: Vec3, t: f32) -> Vec3 {
        let phase = base.x * self.noise;
        let a = t * self.speed;
        Vec3::new(
            (a + phase * 100.0).cos(),
            (a + phase * 100.0).sin(),
            (a + phase * 200.0).cos(),
        ) * self.amplitude
    }
}

/// Revolution of the base position about a fixed pivot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    pub pivot: Vec3,
    /// Angular rate per axis in rad/s
    pub rate: Vec3,
}

impl Orbit {
    pub fn apply(&self, position: Vec3, t: f32) -> Vec3 {
        let angles = self.rate * t;
        let rotation = Quat::from_euler(EulerRot::XYZ, angles.x, angles.y, angles.z);
        self.pivot + rotation * (position - self.pivot)
    }
}

/// How a primitive animates over time
///
/// Evaluation is a pure function of the primitive's static parameters and
/// the elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Motion {
    /// Angular rate per axis in rad/s; a spinning axis overrides the base angle
    pub spin: Vec3,
    /// Added to every spinning axis
    pub phase: f32,
    /// Uniform scale over time
    pub pulse: Option<Wave>,
    /// Emissive intensity over time
    pub glow: Option<Wave>,
    pub float: Option<Float>,
    pub drift: Option<Drift>,
    pub orbit: Option<Orbit>,
}

impl Motion {
    pub fn spin(spin: Vec3, phase: f32) -> Self {
        Self {
            spin,
            phase,
            ..Self::default()
        }
    }

    pub fn with_pulse(mut self, pulse: Wave) -> Self {
        self.pulse = Some(pulse);
        self
    }

    pub fn with_glow(mut self, glow: Wave) -> Self {
        self.glow = Some(glow);
        self
    }

    pub fn with_float(mut self, float: Float) -> Self {
        self.float = Some(float);
        self
    }

    pub fn with_drift(mut self, drift: Drift) -> Self {
        self.drift = Some(drift);
        self
    }

    pub fn with_orbit(mut self, orbit: Orbit) -> Self {
        self.orbit = Some(orbit);
        self
    }

    pub fn is_static(&self) -> bool {
        self.spin == Vec3::ZERO
            && self.pulse.is_none()
            && self.glow.is_none()
            && self.float.is_none()
            && self.drift.is_none()
            && self.orbit.is_none()
    }

    /// Transform of `primitive` at elapsed time `t`
    pub fn evaluate(&self, primitive: &Primitive, t: f32) -> Transform {
        let axis = |rate: f32, base: f32| {
            if rate != 0.0 {
                rate * t + self.phase
            } else {
                base
            }
        };
        let base = primitive.rotation;
        let local_rotation = Quat::from_euler(
            EulerRot::XYZ,
            axis(self.spin.x, base.x),
            axis(self.spin.y, base.y),
            axis(self.spin.z, base.z),
        );

        let mut position = primitive.position;
        if let Some(drift) = &self.drift {
            position += drift.offset(primitive.position, t);
        }
        if let Some(orbit) = &self.orbit {
            position = orbit.apply(position, t);
        }

        let scale = self.pulse.map_or(1.0, |wave| wave.sample(t));
        let emissive_intensity = self
            .glow
            .map_or(primitive.material.emissive_intensity, |wave| wave.sample(t));

        let (rotation, position) = match &self.float {
            Some(float) => {
                let (wrapper, lift) = float.evaluate(t);
                (wrapper * local_rotation, wrapper * position + Vec3::Y * lift)
            }
            None => (local_rotation, position),
        };

        Transform::new(position, rotation, scale, emissive_intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::palette;
    use crate::scene::primitive::{Group, Material, Shape};

    fn cube() -> Primitive {
        Primitive::new(
            Shape::Cube { size: 1.0 },
            Vec3::new(1.0, 2.0, 3.0),
            Material::standard(palette::TEAL_500, 1.0, 0.2),
            Group::Cubes,
        )
    }

    #[test]
    fn static_motion_keeps_rest_pose() {
        let primitive = cube().with_rotation(Vec3::new(0.5, 0.0, 0.0));
        let t = Motion::default().evaluate(&primitive, 12.0);

        assert_eq!(t.position, primitive.position);
        assert_eq!(t.scale, 1.0);
        assert_eq!(t.emissive_intensity, 0.2);
        assert!((t.euler() - primitive.rotation).length() < 1e-5);
    }

    #[test]
    fn spin_is_linear_in_time_plus_phase() {
        let motion = Motion::spin(Vec3::new(0.3, 0.5, 0.0), 0.5);
        let t = motion.evaluate(&cube(), 0.4);
        let expected = Quat::from_euler(EulerRot::XYZ, 0.3 * 0.4 + 0.5, 0.5 * 0.4 + 0.5, 0.0);
        assert!(t.rotation.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn spinning_axis_overrides_base_angle() {
        let primitive = cube().with_rotation(Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, 0.0));
        let motion = Motion::spin(Vec3::new(-0.15, 0.0, 0.25), 0.0);
        let t = motion.evaluate(&primitive, 0.0);
        assert!(t.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn float_lift_is_bounded() {
        let float = Float::new(1.5, 0.5, 0.8, 3.0);
        for i in 0..400 {
            let (_, lift) = float.evaluate(i as f32 * 0.05);
            assert!(lift.abs() <= float.max_lift() + 1e-6);
        }
    }

    #[test]
    fn drift_is_bounded_by_amplitude() {
        let drift = Drift {
            amplitude: 0.2,
            speed: 0.5,
            noise: 1.0,
        };
        for i in 0..100 {
            let offset = drift.offset(Vec3::new(0.3, 0.0, 0.0), i as f32 * 0.1);
            assert!(offset.abs().max_element() <= 0.2 + 1e-6);
        }
    }

    #[test]
    fn orbit_preserves_distance_to_pivot() {
        let orbit = Orbit {
            pivot: Vec3::new(0.0, 0.0, -3.0),
            rate: Vec3::new(0.0, 0.25, 0.0),
        };
        let start = Vec3::new(1.2, 0.5, -3.0);
        for i in 0..50 {
            let p = orbit.apply(start, i as f32 * 0.3);
            assert!((p.distance(orbit.pivot) - start.distance(orbit.pivot)).abs() < 1e-4);
            assert!((p.y - start.y).abs() < 1e-5);
        }
    }

    #[test]
    fn glow_overrides_material_intensity() {
        let motion = Motion::default().with_glow(Wave::new(0.3, 0.1, 3.0, 0.0));
        let t = motion.evaluate(&cube(), 0.0);
        assert!((t.emissive_intensity - 0.3).abs() < 1e-6);
    }
}
