//! Variable-step frame clock with a hard cap on the per-frame delta.
//!
//! The collision resolver assumes small per-tick displacement, so a frame
//! hitch (tab backgrounded, debugger pause) must never turn into one huge
//! step. Every delta handed out is clamped to `[0, max_dt]`.

pub struct FrameClock {
    pub max_dt: f32,
    last_timestamp: Option<f64>,
    pub frame_count: u64,
    pub simulated_time: f64,
    pub clamped_frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            last_timestamp: None,
            frame_count: 0,
            simulated_time: 0.0,
            clamped_frames: 0,
        }
    }

    /// Advances to `now_secs` and returns the delta to simulate.
    ///
    /// The first tick after construction or [`reset`](Self::reset) yields 0.
    /// Non-finite or backwards timestamps also yield 0.
    pub fn tick(&mut self, now_secs: f64) -> f32 {
        self.frame_count += 1;
        if !now_secs.is_finite() {
            return 0.0;
        }

        let previous = self.last_timestamp.replace(now_secs);
        let Some(previous) = previous else {
            return 0.0;
        };

        let raw = now_secs - previous;
        if raw <= 0.0 {
            return 0.0;
        }

        let mut dt = raw as f32;
        if dt > self.max_dt {
            log::warn!(
                "Frame took {:.1}ms; clamping simulation step to {:.1}ms",
                raw * 1000.0,
                self.max_dt * 1000.0
            );
            self.clamped_frames += 1;
            dt = self.max_dt;
        }
        self.simulated_time += dt as f64;
        dt
    }

    /// Forgets the previous timestamp so the next tick is a zero step.
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.04)
    }
}
