/// Symmetric cubic easing, slow at both ends.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// One numeric attribute moving from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
}

impl Tween {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn at(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * ease_cubic_in_out(progress)
    }
}

/// Timing of a fire-and-forget transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl Timeline {
    pub fn new(started_at_ms: f64, duration_ms: u32) -> Self {
        Self { started_at_ms, duration_ms: duration_ms as f64 }
    }

    /// Linear progress in `[0, 1]`; a zero-length timeline is already done.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}
