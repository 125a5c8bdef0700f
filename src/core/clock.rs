use std::time::Instant;

/// Source of per-frame elapsed time
pub trait FrameClock {
    /// Seconds since the previous call
    fn elapsed(&mut self) -> f32;
}

/// Wall clock - tracks delta time between frames
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Get delta time since last tick and advance clock
    /// Returns delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for Clock {
    fn elapsed(&mut self) -> f32 {
        self.tick()
    }
}

/// Deterministic clock for headless runs: every frame lasts `dt`
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    dt: f32,
}

impl FixedStep {
    pub fn new(dt: f32) -> Self {
        Self { dt }
    }

    /// Step matching a display refresh rate
    pub fn from_hz(hz: f32) -> Self {
        Self { dt: 1.0 / hz }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl FrameClock for FixedStep {
    fn elapsed(&mut self) -> f32 {
        self.dt
    }
}
