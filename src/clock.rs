//! Frame timestamps to simulation deltas

/// Turns monotonically increasing timestamps (milliseconds, as handed out by
/// `requestAnimationFrame`) into deltas in seconds.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    /// Upper bound on a single delta; `None` passes stalls through unchanged
    max_dt: Option<f32>,
}

impl FrameClock {
    pub fn new(max_dt: Option<f32>) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Delta since the previous call. The first frame yields zero.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        match self.max_dt {
            Some(max) => dt.min(max),
            None => dt,
        }
    }

    /// Forget the previous timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
