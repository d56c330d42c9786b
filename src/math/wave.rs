use serde::{Deserialize, Serialize};

/// Sinusoid `offset + amplitude * sin(frequency * t + phase)`
///
/// Used for scale pulsing (offset 1) and emissive glow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub offset: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Wave {
    pub const fn new(offset: f32, amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self {
            offset,
            amplitude,
            frequency,
            phase,
        }
    }

    /// Unit-centred pulse: `1 + amplitude * sin(frequency * t + phase)`
    pub const fn pulse(amplitude: f32, frequency: f32, phase: f32) -> Self {
        Self::new(1.0, amplitude, frequency, phase)
    }

    pub fn sample(&self, t: f32) -> f32 {
        self.offset + self.amplitude * (self.frequency * t + self.phase).sin()
    }

    /// Closed interval every sample falls into
    pub fn range(&self) -> (f32, f32) {
        let a = self.amplitude.abs();
        (self.offset - a, self.offset + a)
    }
}
