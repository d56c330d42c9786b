/// Frame - timing handed to every per-frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub number: u64,
    /// Elapsed animation time in seconds
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl Frame {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self {
            number,
            time,
            delta,
        }
    }

    /// Frame `number` of a fixed-rate sequence starting at t = 0
    pub fn fixed_step(number: u64, fps: f32) -> Self {
        let delta = 1.0 / fps;
        Self::new(number, number as f32 * delta, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_times() {
        let frame = Frame::fixed_step(30, 30.0);
        assert_eq!(frame.number, 30);
        assert!((frame.time - 1.0).abs() < 1e-6);
        assert!((frame.delta - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn first_fixed_step_is_zero() {
        assert_eq!(Frame::fixed_step(0, 60.0).time, 0.0);
    }
}
