use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};
use crate::math::{palette, Color};

/// Hero sphere styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub pulse_amplitude: f32,
    pub pulse_frequency: f32,
    pub glow_base: f32,
    pub glow_amplitude: f32,
    pub glow_frequency: f32,
    pub sparkles_per_sphere: usize,
    /// Side of the cube each sparkle cloud fills
    pub sparkle_scale: f32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 0.6,
            pulse_amplitude: 0.1,
            pulse_frequency: 2.0,
            glow_base: 0.3,
            glow_amplitude: 0.1,
            glow_frequency: 3.0,
            sparkles_per_sphere: 20,
            sparkle_scale: 2.0,
        }
    }
}

/// Free-floating data particles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// Side of the cube the field fills; coordinates land in [-extent/2, extent/2]
    pub extent: f32,
    pub size: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            extent: 10.0,
            size: 0.02,
        }
    }
}

/// Double helix of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelixConfig {
    pub enabled: bool,
    pub center: Vec3,
    pub radius: f32,
    pub height: f32,
    pub turns: f32,
    pub points_per_strand: usize,
    /// Spin about the helix axis, rad/s
    pub spin: f32,
    pub point_size: f32,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            center: Vec3::new(0.0, 0.0, -3.0),
            radius: 1.2,
            height: 6.0,
            turns: 2.5,
            points_per_strand: 40,
            spin: 0.25,
            point_size: 0.05,
        }
    }
}

/// Randomly wired node network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub enabled: bool,
    pub nodes: usize,
    pub extent: f32,
    /// Nodes closer than this are joined
    pub max_distance: f32,
    pub node_size: f32,
}

impl NetworkConfig {
    /// Nodes plus one link per pair, the most the generator can emit
    pub fn worst_case_primitives(&self) -> usize {
        if !self.enabled {
            return 0;
        }
        let pairs = self.nodes.saturating_mul(self.nodes.saturating_sub(1)) / 2;
        self.nodes.saturating_add(pairs)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            nodes: 14,
            extent: 9.0,
            max_distance: 3.0,
            node_size: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub fov_degrees: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 9.0),
            fov_degrees: 45.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub color: Color,
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: palette::DARK_900,
            near: 8.0,
            far: 20.0,
        }
    }
}

/// Scene configuration, loadable from JSON
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for particle, sparkle and network placement; entropy when absent
    pub seed: Option<u64>,
    pub spheres: SphereConfig,
    pub particles: ParticleConfig,
    pub helix: HelixConfig,
    pub network: NetworkConfig,
    pub camera: CameraConfig,
    pub fog: FogConfig,
    pub background: Color,
    /// Edge darkening strength, 0 disables the overlay
    pub vignette: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spheres: SphereConfig::default(),
            particles: ParticleConfig::default(),
            helix: HelixConfig::default(),
            network: NetworkConfig::default(),
            camera: CameraConfig::default(),
            fog: FogConfig::default(),
            background: palette::DARK_900,
            vignette: 0.3,
        }
    }
}

const MAX_GENERATED: usize = 100_000;
const HERO_TARGET: Vec3 = Vec3::ZERO;

impl SceneConfig {
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| SceneError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values that would produce non-finite or degenerate geometry
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SceneError::InvalidConfig(msg));
        let positive = |name: &str, v: f32| -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SceneError::InvalidConfig(format!(
                    "{name} must be a positive number, got {v}"
                )))
            }
        };

        let s = &self.spheres;
        positive("spheres.radius", s.radius)?;
        positive("spheres.sparkle_scale", s.sparkle_scale)?;
        if !(0.0..1.0).contains(&s.pulse_amplitude) {
            return invalid(format!(
                "spheres.pulse_amplitude must be in [0, 1), got {}",
                s.pulse_amplitude
            ));
        }
        for (name, v) in [
            ("spheres.pulse_frequency", s.pulse_frequency),
            ("spheres.glow_base", s.glow_base),
            ("spheres.glow_amplitude", s.glow_amplitude),
            ("spheres.glow_frequency", s.glow_frequency),
        ] {
            if !v.is_finite() {
                return invalid(format!("{name} must be finite, got {v}"));
            }
        }

        positive("particles.extent", self.particles.extent)?;
        positive("particles.size", self.particles.size)?;

        if self.helix.enabled {
            positive("helix.radius", self.helix.radius)?;
            positive("helix.height", self.helix.height)?;
            positive("helix.point_size", self.helix.point_size)?;
            if !self.helix.turns.is_finite() || !self.helix.spin.is_finite() {
                return invalid("helix.turns and helix.spin must be finite".into());
            }
            if !self.helix.center.is_finite() {
                return invalid("helix.center must be finite".into());
            }
        }

        if self.network.enabled {
            positive("network.extent", self.network.extent)?;
            positive("network.max_distance", self.network.max_distance)?;
            positive("network.node_size", self.network.node_size)?;
        }

        let counts = s
            .sparkles_per_sphere
            .saturating_mul(3)
            .saturating_add(self.particles.count)
            .saturating_add(self.helix.points_per_strand.saturating_mul(2))
            .saturating_add(self.network.worst_case_primitives());
        if counts > MAX_GENERATED {
            return invalid(format!(
                "scene would generate {counts} primitives, limit is {MAX_GENERATED}"
            ));
        }

        if !self.camera.position.is_finite() {
            return invalid("camera.position must be finite".into());
        }
        // The hero camera looks at the origin with +Y up
        let forward = (HERO_TARGET - self.camera.position).normalize_or_zero();
        if forward == Vec3::ZERO || forward.cross(Vec3::Y).length() < 1e-4 {
            return invalid(format!(
                "camera.position {} must be off the vertical axis through the origin",
                self.camera.position
            ));
        }
        if !(self.camera.fov_degrees > 0.0 && self.camera.fov_degrees < 180.0) {
            return invalid(format!(
                "camera.fov_degrees must be in (0, 180), got {}",
                self.camera.fov_degrees
            ));
        }

        if self.fog.enabled && !(self.fog.near >= 0.0 && self.fog.near < self.fog.far) {
            return invalid(format!(
                "fog.near must be non-negative and below fog.far ({} / {})",
                self.fog.near, self.fog.far
            ));
        }

        if !(0.0..=1.0).contains(&self.vignette) {
            return invalid(format!("vignette must be in [0, 1], got {}", self.vignette));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SceneConfig::from_json(r#"{ "seed": 7, "particles": { "count": 10 } }"#)
            .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.particles.count, 10);
        assert_eq!(config.particles.extent, 10.0);
        assert_eq!(config.spheres, SphereConfig::default());
    }

    #[test]
    fn colors_parse_from_hex() {
        let config = SceneConfig::from_json(r##"{ "background": "#000000" }"##).unwrap();
        assert_eq!(config.background, Color::BLACK);
    }

    #[test]
    fn rejects_pulse_that_could_invert_scale() {
        let mut config = SceneConfig::default();
        config.spheres.pulse_amplitude = 1.5;
        assert!(matches!(config.validate(), Err(SceneError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_inverted_fog() {
        let mut config = SceneConfig::default();
        config.fog.near = 30.0;
        assert!(config.validate().is_err());

        config.fog.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_finite_extent() {
        let mut config = SceneConfig::default();
        config.particles.extent = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_scene() {
        let mut config = SceneConfig::default();
        config.particles.count = MAX_GENERATED + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_dense_network_links() {
        let mut config = SceneConfig::default();
        config.network.nodes = 1500;
        config.network.extent = 1.0;
        assert!(matches!(config.validate(), Err(SceneError::InvalidConfig(_))));

        config.network.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn network_budget_counts_every_pair() {
        let network = NetworkConfig {
            nodes: 10,
            ..NetworkConfig::default()
        };
        assert_eq!(network.worst_case_primitives(), 10 + 45);

        let huge = NetworkConfig {
            nodes: usize::MAX,
            ..NetworkConfig::default()
        };
        assert_eq!(huge.worst_case_primitives(), usize::MAX);
    }

    #[test]
    fn rejects_camera_on_vertical_axis() {
        let mut config = SceneConfig::default();
        for position in [Vec3::new(0.0, 9.0, 0.0), Vec3::new(0.0, -4.0, 0.0), Vec3::ZERO] {
            config.camera.position = position;
            assert!(config.validate().is_err(), "{position} accepted");
        }

        config.camera.position = Vec3::new(0.5, 9.0, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SceneError::ConfigIo { .. }));
    }
}
