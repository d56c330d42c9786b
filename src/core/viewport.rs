/// Smallest device pixel ratio the scene renders at
pub const MIN_DPR: f32 = 1.0;
/// Largest device pixel ratio the scene renders at
pub const MAX_DPR: f32 = 2.0;

/// Viewport - logical size plus device pixel ratio supplied by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in logical pixels
    pub width: u32,
    /// Height in logical pixels
    pub height: u32,
    /// Device pixel ratio, clamped to [MIN_DPR, MAX_DPR]
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        let device_pixel_ratio = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.clamp(MIN_DPR, MAX_DPR)
        } else {
            MIN_DPR
        };

        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Build from a physical size and the host scale factor
    pub fn from_physical(width: u32, height: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
            scale_factor
        } else {
            1.0
        };
        let logical = |v: u32| (v as f64 / scale).round() as u32;
        Self::new(logical(width), logical(height), scale as f32)
    }

    pub fn physical_width(&self) -> u32 {
        (self.width as f32 * self.device_pixel_ratio).round() as u32
    }

    pub fn physical_height(&self) -> u32 {
        (self.height as f32 * self.device_pixel_ratio).round() as u32
    }

    /// Aspect ratio, 1.0 for degenerate viewports
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Total number of physical pixels
    pub fn pixel_count(&self) -> usize {
        self.physical_width() as usize * self.physical_height() as usize
    }

    /// Total size in bytes for RGBA buffer
    pub fn buffer_size(&self) -> usize {
        self.pixel_count() * 4
    }
}
