//! Generators for the hero scene's decorative elements
//!
//! # Examples
//!
//! ```
//! use collabrx_scene::scene::generators::*;
//! use collabrx_scene::math::{palette, scene_rng};
//! use glam::Vec3;
//!
//! let mut rng = scene_rng(Some(1));
//! let mut primitives = blockchain_cube(Vec3::ZERO, 0.0, 0.0).to_vec();
//! primitives.extend(sparkles(&mut rng, Vec3::ZERO, palette::TEAL_500, 20, 2.0, None));
//! assert_eq!(primitives.len(), 22);
//! ```

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::motion::{Drift, Float, Motion, Orbit};
use super::primitive::{DashPattern, Group, Material, Primitive, Shape};
use crate::config::{HelixConfig, NetworkConfig, ParticleConfig, SphereConfig};
use crate::math::{hsv_to_rgb, palette, random_in_cube, random_uniform, Color, Wave};

/// Upper bound of the per-wrapper float offset
const FLOAT_OFFSET_RANGE: f32 = 100.0;

pub(crate) fn float_offset<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    random_uniform(rng, 0.0, FLOAT_OFFSET_RANGE)
}

// ============================================================================
// Primitive Generators
// ============================================================================

/// Glowing sphere that spins, pulses and floats; `delay` phases every wave
pub fn animated_sphere(
    position: Vec3,
    color: Color,
    delay: f32,
    style: &SphereConfig,
    float_offset: f32,
) -> Primitive {
    let motion = Motion::spin(Vec3::new(0.2, 0.3, 0.0), delay)
        .with_pulse(Wave::pulse(style.pulse_amplitude, style.pulse_frequency, delay))
        .with_glow(Wave::new(
            style.glow_base,
            style.glow_amplitude,
            style.glow_frequency,
            delay,
        ))
        .with_float(Float::new(1.0 + delay * 0.5, 0.5, 0.8, float_offset));

    Primitive::new(
        Shape::Sphere {
            radius: style.radius,
        },
        position,
        Material::standard(color, 0.8, style.glow_base),
        Group::Spheres,
    )
    .with_motion(motion)
}

/// Shimmering points scattered in a cube of side `scale` around `center`
pub fn sparkles<R: Rng + ?Sized>(
    rng: &mut R,
    center: Vec3,
    color: Color,
    count: usize,
    scale: f32,
    float: Option<Float>,
) -> Vec<Primitive> {
    (0..count)
        .map(|_| {
            let position = center + random_in_cube(rng, scale);
            let mut motion = Motion::default().with_drift(Drift {
                amplitude: 0.2 * scale / 2.0,
                speed: 0.5,
                noise: random_uniform(rng, 0.5, 1.5),
            });
            motion.float = float;

            Primitive::new(
                Shape::Point {
                    size: random_uniform(rng, 0.015, 0.035),
                },
                position,
                Material::basic(color, random_uniform(rng, 0.4, 1.0)),
                Group::Sparkles,
            )
            .with_motion(motion)
        })
        .collect()
}

/// Ledger block: a solid core and a counter-rotating wireframe shell
pub fn blockchain_cube(position: Vec3, delay: f32, float_offset: f32) -> [Primitive; 2] {
    let float = Float::new(2.0 + delay * 0.3, 1.0, 1.2, float_offset);

    let core = Primitive::new(
        Shape::Cube { size: 0.8 },
        position,
        Material::standard(palette::TEAL_600, 0.3, 0.2),
        Group::Cubes,
    )
    .with_motion(Motion::spin(Vec3::new(0.3, 0.5, 0.0), delay).with_float(float));

    let shell = Primitive::new(
        Shape::Cube { size: 1.0 },
        position,
        Material::standard(palette::TEAL_500, 0.7, 0.1).wireframe(),
        Group::Cubes,
    )
    .with_motion(Motion::spin(Vec3::new(-0.2, -0.3, 0.0), delay).with_float(float));

    [core, shell]
}

/// Dashed links from every even-indexed point to its successor
///
/// Odd-indexed points are hub returns and never start a segment.
pub fn connecting_lines(points: &[Vec3], color: Color) -> Vec<Primitive> {
    points
        .windows(2)
        .enumerate()
        .filter(|(index, _)| index % 2 == 0)
        .map(|(_, pair)| {
            Primitive::new(
                Shape::Segment {
                    start: pair[0],
                    end: pair[1],
                    dash: Some(DashPattern {
                        dash: 0.1,
                        gap: 0.05,
                    }),
                },
                Vec3::ZERO,
                Material::basic(color, 0.6),
                Group::Lines,
            )
        })
        .collect()
}

/// Two nested rings turning on different axes behind the scene
pub fn rotating_tori() -> Vec<Primitive> {
    vec![
        Primitive::new(
            Shape::Torus {
                radius: 2.5,
                tube: 0.1,
            },
            Vec3::new(0.0, 0.0, -2.0),
            Material::standard(palette::TEAL_500, 0.4, 0.2),
            Group::Tori,
        )
        .with_motion(Motion::spin(Vec3::new(0.2, 0.3, 0.0), 0.0)),
        Primitive::new(
            Shape::Torus {
                radius: 1.8,
                tube: 0.08,
            },
            Vec3::new(0.0, 0.0, -1.5),
            Material::standard(palette::TEAL_600, 0.3, 0.15),
            Group::Tori,
        )
        .with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0))
        .with_motion(Motion::spin(Vec3::new(-0.15, 0.0, 0.25), 0.0)),
    ]
}

/// Floating data points filling a cube of side `config.extent`
pub fn data_particles<R: Rng + ?Sized>(rng: &mut R, config: &ParticleConfig) -> Vec<Primitive> {
    (0..config.count)
        .map(|_| {
            let position = random_in_cube(rng, config.extent);
            let speed = random_uniform(rng, 0.1, 0.6);
            let color = if rng.gen_bool(0.5) {
                palette::TEAL_500
            } else {
                palette::TEAL_600
            };

            Primitive::new(
                Shape::Point { size: config.size },
                position,
                Material::basic(color, 0.8),
                Group::Particles,
            )
            .with_motion(Motion::default().with_float(Float::new(
                speed,
                1.0,
                2.0,
                float_offset(rng),
            )))
        })
        .collect()
}

/// Double helix of points around a vertical axis through `config.center`
///
/// Strands are half a turn apart; the whole helix spins about its axis.
pub fn helix(config: &HelixConfig) -> Vec<Primitive> {
    let n = config.points_per_strand;
    if n == 0 {
        return Vec::new();
    }

    (0..2)
        .flat_map(|strand| {
            (0..n).map(move |i| {
                let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
                let angle = t * config.turns * TAU + strand as f32 * std::f32::consts::PI;
                let local = Vec3::new(
                    angle.cos() * config.radius,
                    (t - 0.5) * config.height,
                    angle.sin() * config.radius,
                );
                let hue = 0.47 + 0.05 * t + 0.03 * strand as f32;
                let [r, g, b] = hsv_to_rgb(hue, 0.85, 0.8);

                Primitive::new(
                    Shape::Point {
                        size: config.point_size,
                    },
                    config.center + local,
                    Material::basic(Color::rgb(r, g, b), 0.9),
                    Group::Helix,
                )
                .with_motion(Motion::default().with_orbit(Orbit {
                    pivot: config.center,
                    rate: Vec3::new(0.0, config.spin, 0.0),
                }))
            })
        })
        .collect()
}

/// Random nodes joined wherever two lie within `config.max_distance`
pub fn network<R: Rng + ?Sized>(rng: &mut R, config: &NetworkConfig) -> Vec<Primitive> {
    let nodes: Vec<Vec3> = (0..config.nodes)
        .map(|_| random_in_cube(rng, config.extent))
        .collect();

    let points = nodes.iter().map(|&position| {
        Primitive::new(
            Shape::Point {
                size: config.node_size,
            },
            position,
            Material::basic(palette::CYAN_500, 0.9),
            Group::Network,
        )
    });

    let links = nodes.iter().enumerate().flat_map(|(i, &a)| {
        nodes[i + 1..]
            .iter()
            .filter(move |&&b| a.distance(b) < config.max_distance)
            .map(move |&b| {
                Primitive::new(
                    Shape::Segment {
                        start: a,
                        end: b,
                        dash: None,
                    },
                    Vec3::ZERO,
                    Material::basic(palette::TEAL_500, 0.25),
                    Group::Network,
                )
            })
    });

    points.chain(links).collect()
}
