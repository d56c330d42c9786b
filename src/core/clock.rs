use std::time::{Duration, Instant};

/// Animation clock - elapsed seconds since start, excluding paused spans
///
/// The scene only ever reads `elapsed()`; pausing freezes it and resuming
/// continues from the same value, so the scene picks up where it stopped.
#[derive(Debug)]
pub struct AnimationClock {
    start: Instant,
    last_tick: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl AnimationClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Elapsed animation time in seconds
    pub fn elapsed(&self) -> f32 {
        let now = self.paused_at.unwrap_or_else(Instant::now);
        now.duration_since(self.start)
            .saturating_sub(self.paused_total)
            .as_secs_f32()
    }

    /// Get delta time since last tick and advance clock
    /// Returns 0 while paused
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        if self.is_paused() {
            0.0
        } else {
            delta
        }
    }

    pub fn pause(&mut self) {
        if self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
            self.last_tick = Instant::now();
        }
    }

    pub fn toggle(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Reset clock to zero elapsed time
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
