use std::f32::consts::TAU;

use glam::Vec3;

use super::camera::{Camera, ScreenPoint};
use super::canvas::{Canvas, DrawOp, Rgba};
use crate::math::Color;
use crate::scene::{Environment, Material, PrimitiveRecord, SceneComposer, Shape, Transform};

/// Corners of the unit cube, index bits are (x, y, z)
const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
];

/// Faces as counter-clockwise quads seen from outside, with their normal
const CUBE_FACES: [([usize; 4], Vec3); 6] = [
    ([1, 3, 7, 5], Vec3::X),
    ([0, 4, 6, 2], Vec3::NEG_X),
    ([2, 6, 7, 3], Vec3::Y),
    ([0, 1, 5, 4], Vec3::NEG_Y),
    ([4, 5, 7, 6], Vec3::Z),
    ([0, 2, 3, 1], Vec3::NEG_Z),
];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Primitives draw back to front; each contributes one item
struct DrawItem {
    depth: f32,
    ops: Vec<DrawOp>,
}

/// Projects composed primitives through a camera onto a canvas
///
/// Occlusion is resolved with the painter's algorithm: items are sorted by
/// view depth and drawn farthest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    /// Polyline resolution of torus rings
    pub torus_segments: usize,
    /// Halo radius relative to the sphere, drawn for glowing spheres
    pub halo_scale: f32,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            torus_segments: 64,
            halo_scale: 1.35,
        }
    }
}

impl Projector {
    /// Queue the whole frame on `canvas`; returns the number of primitives drawn
    pub fn draw(&self, composer: &SceneComposer, camera: &Camera, canvas: &mut Canvas) -> usize {
        let env = composer.environment();
        canvas.push(DrawOp::Clear(Rgba::from_color(env.background, 1.0)));

        let mut items: Vec<DrawItem> = composer
            .arena()
            .iter()
            .filter_map(|(_, record)| self.item(record, env, camera))
            .collect();
        items.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        let drawn = items.len();
        for item in items {
            for op in item.ops {
                canvas.push(op);
            }
        }

        if let Some(vignette) = env.vignette {
            canvas.push(DrawOp::Vignette {
                color: Rgba::from_color(vignette.color, vignette.strength),
                inner: vignette.inner,
                outer: vignette.outer,
            });
        }

        drawn
    }

    /// Render a complete frame into a fresh canvas
    pub fn render(&self, composer: &SceneComposer, camera: &Camera) -> Canvas {
        let (width, height) = camera.dimensions();
        let mut canvas = Canvas::new(width, height);
        self.draw(composer, camera, &mut canvas);
        canvas.execute_ops()
    }

    fn item(
        &self,
        record: &PrimitiveRecord,
        env: &Environment,
        camera: &Camera,
    ) -> Option<DrawItem> {
        let transform = &record.transform;
        let material = &record.primitive.material;
        let shader = Shader {
            env,
            camera,
            material,
            emissive_intensity: transform.emissive_intensity,
        };

        let (depth, ops) = match record.primitive.shape {
            Shape::Sphere { radius } => self.sphere(radius, transform, &shader)?,
            Shape::Cube { size } => cube(size, transform, &shader)?,
            Shape::Torus { radius, tube } => self.torus(radius, tube, transform, &shader)?,
            Shape::Segment { start, end, dash } => {
                let a = transform.apply(start);
                let b = transform.apply(end);
                let depth = camera.depth((a + b) * 0.5);
                let color = shader.flat(depth);
                let ppu = camera.pixels_per_unit(depth);
                let dash = dash.map(|pattern| (pattern.dash * ppu, pattern.gap * ppu));
                let op = line_op(camera, a, b, color, dash)?;
                (depth, vec![op])
            }
            Shape::Point { size } => {
                let p = camera.project(transform.position)?;
                let radius = size * transform.scale * camera.pixels_per_unit(p.depth);
                let op = DrawOp::FilledCircle {
                    cx: p.x.round() as i32,
                    cy: p.y.round() as i32,
                    radius: pixel_radius(radius, camera),
                    color: shader.flat(p.depth),
                };
                (p.depth, vec![op])
            }
        };

        Some(DrawItem { depth, ops })
    }

    fn sphere(
        &self,
        radius: f32,
        transform: &Transform,
        shader: &Shader,
    ) -> Option<(f32, Vec<DrawOp>)> {
        let center = shader.camera.project(transform.position)?;
        let world_radius = radius * transform.scale;
        let px = world_radius * shader.camera.pixels_per_unit(center.depth);
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);

        let facing = (shader.camera.rig.position - transform.position).normalize_or_zero();
        let mut ops = Vec::with_capacity(3);

        if shader.emissive_intensity > 0.0 {
            let halo = shader
                .material
                .emissive
                .scale(shader.emissive_intensity.min(1.0));
            ops.push(DrawOp::FilledCircle {
                cx,
                cy,
                radius: pixel_radius(px * self.halo_scale, shader.camera),
                color: Rgba::from_color(
                    shader.fogged(halo, center.depth),
                    0.25 * shader.emissive_intensity.min(1.0),
                ),
            });
        }

        ops.push(DrawOp::FilledCircle {
            cx,
            cy,
            radius: pixel_radius(px, shader.camera),
            color: shader.lit(transform.position + facing * world_radius, facing, center.depth),
        });

        // Specular-ish highlight toward the upper right
        let up_right = (facing + Vec3::new(0.4, 0.4, 0.0)).normalize_or_zero();
        ops.push(DrawOp::FilledCircle {
            cx: cx + (px * 0.25).round() as i32,
            cy: cy - (px * 0.25).round() as i32,
            radius: pixel_radius(px * 0.45, shader.camera),
            color: shader.lit(transform.position + up_right * world_radius, up_right, center.depth),
        });

        Some((center.depth, ops))
    }

    fn torus(
        &self,
        radius: f32,
        tube: f32,
        transform: &Transform,
        shader: &Shader,
    ) -> Option<(f32, Vec<DrawOp>)> {
        let segments = self.torus_segments.max(3);
        let ring: Vec<Vec3> = (0..=segments)
            .map(|i| {
                let angle = i as f32 / segments as f32 * TAU;
                transform.apply(Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0))
            })
            .collect();

        let depth = shader.camera.depth(transform.position);
        if depth < shader.camera.rig.near {
            return None;
        }

        let normal = transform.rotation * Vec3::Z;
        let color = shader.lit(transform.position, normal, depth);
        let thickness = (tube * transform.scale * shader.camera.pixels_per_unit(depth))
            .round()
            .max(0.0) as i32;

        let ops = ring
            .windows(2)
            .flat_map(move |pair| {
                (-thickness / 2..=thickness / 2).filter_map(move |offset| {
                    let shift = |op: DrawOp| match op {
                        DrawOp::Line { x1, y1, x2, y2, color } => DrawOp::Line {
                            x1,
                            y1: y1 + offset,
                            x2,
                            y2: y2 + offset,
                            color,
                        },
                        other => other,
                    };
                    line_op(shader.camera, pair[0], pair[1], color, None).map(shift)
                })
            })
            .collect();

        Some((depth, ops))
    }
}

fn cube(size: f32, transform: &Transform, shader: &Shader) -> Option<(f32, Vec<DrawOp>)> {
    let camera = shader.camera;
    let depth = camera.depth(transform.position);
    if depth < camera.rig.near {
        return None;
    }

    let corners: Vec<Vec3> = CUBE_CORNERS
        .iter()
        .map(|&corner| transform.apply(corner * size))
        .collect();

    if shader.material.wireframe {
        let color = shader.lit(transform.position, camera.rig.position - transform.position, depth);
        let ops = CUBE_EDGES
            .iter()
            .filter_map(|&(a, b)| line_op(camera, corners[a], corners[b], color, None))
            .collect();
        return Some((depth, ops));
    }

    let mut faces: Vec<(f32, [usize; 4], Vec3)> = CUBE_FACES
        .iter()
        .filter_map(|&(quad, local_normal)| {
            let normal = transform.rotation * local_normal;
            let center = quad.iter().map(|&i| corners[i]).sum::<Vec3>() * 0.25;
            let to_camera = camera.rig.position - center;
            (normal.dot(to_camera) > 0.0).then(|| (camera.depth(center), quad, normal))
        })
        .collect();
    faces.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut ops = Vec::with_capacity(faces.len() * 2);
    for (face_depth, quad, normal) in faces {
        let projected: Option<Vec<ScreenPoint>> =
            quad.iter().map(|&i| camera.project(corners[i])).collect();
        let Some(p) = projected else {
            continue;
        };
        let center = quad.iter().map(|&i| corners[i]).sum::<Vec3>() * 0.25;
        let color = shader.lit(center, normal, face_depth);
        let v = |s: &ScreenPoint| (s.x, s.y);
        ops.push(DrawOp::Triangle {
            vertices: [v(&p[0]), v(&p[1]), v(&p[2])],
            color,
        });
        ops.push(DrawOp::Triangle {
            vertices: [v(&p[0]), v(&p[2]), v(&p[3])],
            color,
        });
    }

    Some((depth, ops))
}

/// Per-primitive shading inputs
struct Shader<'a> {
    env: &'a Environment,
    camera: &'a Camera,
    material: &'a Material,
    emissive_intensity: f32,
}

impl Shader<'_> {
    fn fogged(&self, color: Color, depth: f32) -> Color {
        match &self.env.fog {
            Some(fog) => fog.apply(color, depth),
            None => color,
        }
    }

    /// Unlit material color
    fn flat(&self, depth: f32) -> Rgba {
        Rgba::from_color(self.fogged(self.material.color, depth), self.material.opacity)
    }

    /// Diffuse lighting plus emission for standard materials
    fn lit(&self, point: Vec3, normal: Vec3, depth: f32) -> Rgba {
        if self.material.is_unlit() {
            return self.flat(depth);
        }

        let normal = normal.normalize_or_zero();
        let diffuse = self.material.color.modulate(self.env.irradiance(point, normal));
        let emission = self.material.emissive.scale(self.emissive_intensity);
        let color = self.fogged(diffuse.add(emission).clamped(), depth);
        Rgba::from_color(color, self.material.opacity)
    }
}

/// Clamp a projected radius so huge near-plane discs stay bounded
fn pixel_radius(radius: f32, camera: &Camera) -> u32 {
    let (w, h) = camera.dimensions();
    let limit = w.max(h) as f32;
    radius.round().clamp(0.0, limit) as u32
}

/// Project a world segment into a line op, clipped to the canvas
fn line_op(
    camera: &Camera,
    a: Vec3,
    b: Vec3,
    color: Rgba,
    dash: Option<(f32, f32)>,
) -> Option<DrawOp> {
    let p = camera.project(a)?;
    let q = camera.project(b)?;
    let (w, h) = camera.dimensions();
    let ((x1, y1), (x2, y2)) = clip_line((p.x, p.y), (q.x, q.y), w as f32, h as f32)?;
    let (x1, y1, x2, y2) = (
        x1.round() as i32,
        y1.round() as i32,
        x2.round() as i32,
        y2.round() as i32,
    );

    Some(match dash {
        Some((dash, gap)) => DrawOp::DashedLine {
            x1,
            y1,
            x2,
            y2,
            dash: dash.round().max(1.0) as u32,
            gap: gap.round().max(1.0) as u32,
            color,
        },
        None => DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
        },
    })
}

/// Liang-Barsky clip of a segment against `[0, w] x [0, h]`
pub fn clip_line(
    p: (f32, f32),
    q: (f32, f32),
    w: f32,
    h: f32,
) -> Option<((f32, f32), (f32, f32))> {
    if !(p.0.is_finite() && p.1.is_finite() && q.0.is_finite() && q.1.is_finite()) {
        return None;
    }

    let (dx, dy) = (q.0 - p.0, q.1 - p.1);
    let mut t0: f32 = 0.0;
    let mut t1: f32 = 1.0;

    for (edge_p, edge_q) in [(-dx, p.0), (dx, w - p.0), (-dy, p.1), (dy, h - p.1)] {
        if edge_p == 0.0 {
            if edge_q < 0.0 {
                return None;
            }
            continue;
        }
        let r = edge_q / edge_p;
        if edge_p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (p.0 + t0 * dx, p.1 + t0 * dy),
        (p.0 + t1 * dx, p.1 + t1 * dy),
    ))
}
