use glam::Vec3;

use super::environment::{CameraRig, Environment, Fog, Light, Vignette};
use super::generators::{self, float_offset};
use super::primitive::Primitive;
use crate::config::SceneConfig;
use crate::math::{palette, scene_rng, Color};

/// Sphere anchors with their color and animation delay
pub const SPHERES: [(Vec3, Color, f32); 3] = [
    (Vec3::new(-2.5, 1.5, 0.0), palette::TEAL_500, 0.0),
    (Vec3::new(2.5, -1.5, 0.5), palette::CYAN_500, 1.0),
    (Vec3::new(0.0, 2.0, -1.0), palette::TEAL_600, 2.0),
];

/// Blockchain cube anchors with their animation delay
pub const CUBES: [(Vec3, f32); 4] = [
    (Vec3::new(0.0, 0.0, 0.0), 0.0),
    (Vec3::new(-3.0, -1.0, -1.0), 0.5),
    (Vec3::new(3.0, 1.0, -1.0), 1.0),
    (Vec3::new(1.0, -2.0, 1.0), 1.5),
];

/// Spokes from the central block; every odd entry returns to the hub
pub const LINE_POINTS: [Vec3; 7] = [
    Vec3::new(-2.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(2.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(-3.0, -1.0, -1.0),
    Vec3::new(0.0, 0.0, 0.0),
    Vec3::new(3.0, 1.0, -1.0),
];

/// Generate every primitive of the landing-page hero scene
///
/// All randomness is drawn from one generator seeded by `config.seed`, in a
/// fixed order, so a seeded config always produces the same scene.
pub fn hero_primitives(config: &SceneConfig) -> Vec<Primitive> {
    let mut rng = scene_rng(config.seed);
    let mut primitives = Vec::new();

    for (position, color, delay) in SPHERES {
        let sphere = generators::animated_sphere(
            position,
            color,
            delay,
            &config.spheres,
            float_offset(&mut rng),
        );
        // Sparkles ride in the sphere's float wrapper
        primitives.extend(generators::sparkles(
            &mut rng,
            position,
            color,
            config.spheres.sparkles_per_sphere,
            config.spheres.sparkle_scale,
            sphere.motion.float,
        ));
        primitives.push(sphere);
    }

    for (position, delay) in CUBES {
        primitives.extend(generators::blockchain_cube(
            position,
            delay,
            float_offset(&mut rng),
        ));
    }

    primitives.extend(generators::connecting_lines(&LINE_POINTS, palette::TEAL_500));
    primitives.extend(generators::rotating_tori());
    primitives.extend(generators::data_particles(&mut rng, &config.particles));

    if config.helix.enabled {
        primitives.extend(generators::helix(&config.helix));
    }
    if config.network.enabled {
        primitives.extend(generators::network(&mut rng, &config.network));
    }

    primitives
}

/// Hero lighting rig: soft ambient, three colored points and a spot
pub fn hero_lights() -> Vec<Light> {
    vec![
        Light::Ambient {
            color: Color::WHITE,
            intensity: 0.3,
        },
        Light::Point {
            position: Vec3::new(10.0, 10.0, 10.0),
            color: palette::TEAL_500,
            intensity: 1.2,
        },
        Light::Point {
            position: Vec3::new(-10.0, -10.0, -10.0),
            color: palette::TEAL_600,
            intensity: 0.8,
        },
        Light::Point {
            position: Vec3::new(0.0, 10.0, 5.0),
            color: palette::CYAN_500,
            intensity: 0.6,
        },
        Light::Spot {
            position: Vec3::new(0.0, 5.0, 5.0),
            target: Vec3::ZERO,
            angle: 0.3,
            penumbra: 1.0,
            color: palette::TEAL_500,
            intensity: 0.5,
        },
    ]
}

pub fn hero_environment(config: &SceneConfig) -> Environment {
    let camera = CameraRig {
        position: config.camera.position,
        fov_degrees: config.camera.fov_degrees,
        ..CameraRig::default()
    };

    let fog = config.fog.enabled.then_some(Fog {
        color: config.fog.color,
        near: config.fog.near,
        far: config.fog.far,
    });

    let vignette = (config.vignette > 0.0).then_some(Vignette {
        color: palette::DARK_900,
        inner: 0.2,
        outer: 0.7,
        strength: config.vignette,
    });

    Environment {
        camera,
        lights: hero_lights(),
        fog,
        background: config.background,
        vignette,
    }
}
