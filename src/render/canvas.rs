use crate::math::Color;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_color(color: Color, opacity: f32) -> Self {
        let [r, g, b] = color.to_rgb8();
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(r, g, b, a)
    }
}

/// 2D drawing operations for canvas
///
/// Everything except `Clear` and `Pixel` is alpha-blended over what is
/// already on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Fill entire canvas with color
    Clear(Rgba),

    /// Overwrite pixel at (x, y)
    Pixel { x: i32, y: i32, color: Rgba },

    /// Line from (x1, y1) to (x2, y2)
    Line { x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba },

    /// Line drawn as `dash` pixels on, `gap` pixels off
    DashedLine { x1: i32, y1: i32, x2: i32, y2: i32, dash: u32, gap: u32, color: Rgba },

    /// Circle outline at (cx, cy)
    Circle { cx: i32, cy: i32, radius: u32, color: Rgba },

    /// Filled circle at (cx, cy)
    FilledCircle { cx: i32, cy: i32, radius: u32, color: Rgba },

    /// Filled triangle, vertices in pixel coordinates
    Triangle { vertices: [(f32, f32); 3], color: Rgba },

    /// Radial darkening; radii are fractions of the half-diagonal
    Vignette { color: Rgba, inner: f32, outer: f32 },
}

/// Canvas state - pixel buffer with draw operations
#[derive(Debug, Clone)]
pub struct Canvas {
    /// RGBA pixel buffer
    pixels: Vec<u8>,
    /// Alpha channel (0.0 = transparent, 1.0 = opaque)
    alpha: Vec<f32>,
    /// Pending draw operations
    operations: Vec<DrawOp>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = width as usize * height as usize;

        Self {
            pixels: vec![0; pixel_count * 4],
            alpha: vec![0.0; pixel_count],
            operations: Vec::new(),
            width,
            height,
        }
    }

    /// Add draw operation - functional style
    pub fn draw(mut self, op: DrawOp) -> Self {
        self.operations.push(op);
        self
    }

    /// Queue a draw operation in place
    pub fn push(&mut self, op: DrawOp) {
        self.operations.push(op);
    }

    pub fn pending(&self) -> usize {
        self.operations.len()
    }

    /// Execute all pending operations
    pub fn execute_ops(mut self) -> Self {
        let operations = std::mem::take(&mut self.operations);
        for op in &operations {
            self.execute_op(op);
        }
        self
    }

    fn execute_op(&mut self, op: &DrawOp) {
        match *op {
            DrawOp::Clear(color) => self.clear(color),
            DrawOp::Pixel { x, y, color } => self.set_pixel(x, y, color),
            DrawOp::Line { x1, y1, x2, y2, color } => {
                self.draw_line(x1, y1, x2, y2, color, None)
            }
            DrawOp::DashedLine { x1, y1, x2, y2, dash, gap, color } => {
                self.draw_line(x1, y1, x2, y2, color, Some((dash.max(1), gap)))
            }
            DrawOp::Circle { cx, cy, radius, color } => self.draw_circle(cx, cy, radius, color),
            DrawOp::FilledCircle { cx, cy, radius, color } => {
                self.draw_filled_circle(cx, cy, radius, color)
            }
            DrawOp::Triangle { vertices, color } => self.draw_triangle(vertices, color),
            DrawOp::Vignette { color, inner, outer } => self.draw_vignette(color, inner, outer),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn clear(&mut self, color: Rgba) {
        let alpha = color.a as f32 / 255.0;
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        self.alpha.fill(alpha);
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let Some(i) = self.index(x, y) else {
            return;
        };

        self.pixels[i * 4..i * 4 + 4].copy_from_slice(&[color.r, color.g, color.b, color.a]);
        self.alpha[i] = color.a as f32 / 255.0;
    }

    /// Source-over blend onto the existing pixel
    fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        if color.a == 0 {
            return;
        }

        let src_a = color.a as f32 / 255.0;
        let dst_a = self.alpha[i];
        let out_a = src_a + dst_a * (1.0 - src_a);

        let px = &mut self.pixels[i * 4..i * 4 + 4];
        for (channel, src) in px.iter_mut().take(3).zip([color.r, color.g, color.b]) {
            let dst = *channel as f32 * dst_a;
            let blended = if out_a > 0.0 {
                (src as f32 * src_a + dst * (1.0 - src_a)) / out_a
            } else {
                0.0
            };
            *channel = blended.round().clamp(0.0, 255.0) as u8;
        }
        px[3] = (out_a * 255.0).round() as u8;
        self.alpha[i] = out_a;
    }

    /// Bresenham line, optionally dashed by a (on, off) pixel pattern
    fn draw_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Rgba,
        dash: Option<(u32, u32)>,
    ) {
        let (mut x, mut y) = (x1, y1);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut step: u32 = 0;

        loop {
            let on = match dash {
                Some((on, off)) => step % (on + off) < on,
                None => true,
            };
            if on {
                self.blend_pixel(x, y, color);
            }
            step = step.wrapping_add(1);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle outline
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let (mut x, mut y) = (radius as i32, 0i32);
        let mut p = 1 - radius as i32;

        while x >= y {
            let mut points = vec![
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ];
            // Octant seams repeat points; blending them twice would darken the seam
            points.sort_unstable();
            points.dedup();
            for (px, py) in points {
                self.blend_pixel(px, py, color);
            }

            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * (y - x) + 1;
            }
        }
    }

    fn draw_filled_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgba) {
        let radius = radius as i32;
        let r_sq = radius * radius;

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r_sq {
                    self.blend_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Fill pixels whose centers fall inside the triangle
    fn draw_triangle(&mut self, vertices: [(f32, f32); 3], color: Rgba) {
        let [a, b, c] = vertices;
        let edge = |p: (f32, f32), q: (f32, f32), x: f32, y: f32| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };

        let area = edge(a, b, c.0, c.1);
        if area == 0.0 || !area.is_finite() {
            return;
        }

        let min_x = a.0.min(b.0).min(c.0).floor().max(0.0) as i32;
        let max_x = a.0.max(b.0).max(c.0).ceil().min(self.width as f32) as i32;
        let min_y = a.1.min(b.1).min(c.1).floor().max(0.0) as i32;
        let max_y = a.1.max(b.1).max(c.1).ceil().min(self.height as f32) as i32;

        for y in min_y..max_y {
            for x in min_x..max_x {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, px, py) / area;
                let w1 = edge(c, a, px, py) / area;
                let w2 = edge(a, b, px, py) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    fn draw_vignette(&mut self, color: Rgba, inner: f32, outer: f32) {
        let (cx, cy) = (self.width as f32 * 0.5, self.height as f32 * 0.5);
        let half_diagonal = (cx * cx + cy * cy).sqrt();
        if half_diagonal == 0.0 {
            return;
        }

        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let (dx, dy) = (x as f32 + 0.5 - cx, y as f32 + 0.5 - cy);
                let r = (dx * dx + dy * dy).sqrt() / half_diagonal;
                let ramp = if outer <= inner {
                    if r >= inner { 1.0 } else { 0.0 }
                } else {
                    ((r - inner) / (outer - inner)).clamp(0.0, 1.0)
                };
                let a = (color.a as f32 * ramp).round() as u8;
                self.blend_pixel(x, y, Rgba { a, ..color });
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let i = self.index(x as i32, y as i32)?;
        let p = &self.pixels[i * 4..i * 4 + 4];
        Some(Rgba::new(p[0], p[1], p[2], p[3]))
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn alpha(&self) -> &[f32] {
        &self.alpha
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 100);
        assert_eq!(canvas.dimensions(), (100, 100));
        assert_eq!(canvas.pixels().len(), 100 * 100 * 4);
        assert_eq!(canvas.alpha().len(), 100 * 100);
    }

    #[test]
    fn canvas_clear() {
        let canvas = Canvas::new(10, 10).draw(DrawOp::Clear(RED)).execute_ops();

        assert_eq!(&canvas.pixels()[0..4], &[255, 0, 0, 255]);
        let last_idx = 10 * 10 * 4 - 4;
        assert_eq!(&canvas.pixels()[last_idx..last_idx + 4], &[255, 0, 0, 255]);
        assert_eq!(canvas.alpha()[99], 1.0);
    }

    #[test]
    fn canvas_set_pixel() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Pixel { x: 5, y: 5, color: Rgba::new(100, 150, 200, 128) })
            .execute_ops();

        let idx = (5 * 10 + 5) * 4;
        assert_eq!(&canvas.pixels()[idx..idx + 4], &[100, 150, 200, 128]);
        assert!((canvas.alpha()[5 * 10 + 5] - 128.0 / 255.0).abs() < 0.01);
    }

    #[test]
    fn canvas_out_of_bounds_is_ignored() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Pixel { x: -1, y: 3, color: RED })
            .draw(DrawOp::Line { x1: -20, y1: -20, x2: -5, y2: -5, color: RED })
            .execute_ops();
        assert!(canvas.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn blending_half_white_over_black() {
        let canvas = Canvas::new(1, 1)
            .draw(DrawOp::Clear(Rgba::new(0, 0, 0, 255)))
            .draw(DrawOp::FilledCircle { cx: 0, cy: 0, radius: 0, color: Rgba::new(255, 255, 255, 128) })
            .execute_ops();

        let p = canvas.pixel(0, 0).unwrap();
        assert!((p.r as i32 - 128).abs() <= 1);
        assert_eq!(p.a, 255);
    }

    #[test]
    fn dashed_line_leaves_gaps() {
        let canvas = Canvas::new(20, 1)
            .draw(DrawOp::DashedLine { x1: 0, y1: 0, x2: 19, y2: 0, dash: 3, gap: 2, color: RED })
            .execute_ops();

        let lit: Vec<bool> = (0..20).map(|x| canvas.pixel(x, 0).unwrap().a > 0).collect();
        assert_eq!(&lit[0..5], &[true, true, true, false, false]);
        assert_eq!(lit.iter().filter(|&&on| on).count(), 12);
    }

    #[test]
    fn triangle_fills_interior_only() {
        let canvas = Canvas::new(10, 10)
            .draw(DrawOp::Triangle { vertices: [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)], color: RED })
            .execute_ops();

        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(9, 9), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn vignette_keeps_center_clear() {
        let canvas = Canvas::new(40, 40)
            .draw(DrawOp::Clear(Rgba::new(255, 255, 255, 255)))
            .draw(DrawOp::Vignette { color: Rgba::new(0, 0, 0, 200), inner: 0.2, outer: 0.7 })
            .execute_ops();

        assert_eq!(canvas.pixel(20, 20), Some(Rgba::new(255, 255, 255, 255)));
        assert!(canvas.pixel(0, 0).unwrap().r < 100);
    }
}
