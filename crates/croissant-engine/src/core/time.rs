/// Frame clock for the variable-timestep loop.
///
/// The platform passes the `requestAnimationFrame` timestamp; the clock
/// turns it into an elapsed-seconds delta. The first frame reports 0 so a
/// slow page load never produces a huge spike, and deltas are clamped so a
/// background tab resuming does not teleport every timer.
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Advance the clock to `now_ms` and return the frame delta in seconds.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            None => 0.0,
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
        };
        self.last_ms = Some(now_ms);
        dt.min(self.max_dt)
    }
}
