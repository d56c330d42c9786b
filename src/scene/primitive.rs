use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::motion::Motion;
use crate::math::Color;

/// Index of a primitive in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimitiveId(pub usize);

/// Dash pattern for line segments, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub dash: f32,
    pub gap: f32,
}

/// Shape descriptor with shape-specific parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Sphere { radius: f32 },
    Cube { size: f32 },
    /// Ring in the local XY plane
    Torus { radius: f32, tube: f32 },
    /// Endpoints relative to the primitive position
    Segment {
        start: Vec3,
        end: Vec3,
        dash: Option<DashPattern>,
    },
    Point { size: f32 },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Cube { .. } => "cube",
            Shape::Torus { .. } => "torus",
            Shape::Segment { .. } => "segment",
            Shape::Point { .. } => "point",
        }
    }
}

/// Surface appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Color,
    pub opacity: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub wireframe: bool,
}

impl Material {
    /// Lit material glowing in its own color
    pub fn standard(color: Color, opacity: f32, emissive_intensity: f32) -> Self {
        Self {
            color,
            opacity,
            emissive: color,
            emissive_intensity,
            wireframe: false,
        }
    }

    /// Unlit flat color
    pub fn basic(color: Color, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            emissive: Color::BLACK,
            emissive_intensity: 0.0,
            wireframe: false,
        }
    }

    pub fn wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }

    /// Flat materials ignore scene lighting
    pub fn is_unlit(&self) -> bool {
        self.emissive_intensity == 0.0 && self.emissive == Color::BLACK
    }
}

/// Scene element a primitive belongs to
///
/// Each animated group gets its own frame callback when mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Spheres,
    Sparkles,
    Cubes,
    Lines,
    Tori,
    Particles,
    Helix,
    Network,
}

impl Group {
    pub const ALL: [Group; 8] = [
        Group::Spheres,
        Group::Sparkles,
        Group::Cubes,
        Group::Lines,
        Group::Tori,
        Group::Particles,
        Group::Helix,
        Group::Network,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Group::Spheres => "spheres",
            Group::Sparkles => "sparkles",
            Group::Cubes => "cubes",
            Group::Lines => "lines",
            Group::Tori => "tori",
            Group::Particles => "particles",
            Group::Helix => "helix",
            Group::Network => "network",
        }
    }
}

/// Visual primitive - static parameters fixed at scene initialization
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub shape: Shape,
    pub position: Vec3,
    /// Euler angles (XYZ order, radians)
    pub rotation: Vec3,
    pub material: Material,
    pub motion: Motion,
    pub group: Group,
}

impl Primitive {
    pub fn new(shape: Shape, position: Vec3, material: Material, group: Group) -> Self {
        Self {
            shape,
            position,
            rotation: Vec3::ZERO,
            material,
            motion: Motion::default(),
            group,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn is_animated(&self) -> bool {
        !self.motion.is_static()
    }

    /// Every stored parameter is a finite number
    pub fn is_finite(&self) -> bool {
        let shape_ok = match self.shape {
            Shape::Sphere { radius } => radius.is_finite(),
            Shape::Cube { size } => size.is_finite(),
            Shape::Torus { radius, tube } => radius.is_finite() && tube.is_finite(),
            Shape::Segment { start, end, .. } => start.is_finite() && end.is_finite(),
            Shape::Point { size } => size.is_finite(),
        };

        shape_ok
            && self.position.is_finite()
            && self.rotation.is_finite()
            && self.material.color.is_finite()
            && self.material.opacity.is_finite()
    }
}
