//! Eased page scrolling. One instance exists per page run; every sampler
//! reads the eased offset and nothing else writes it, so per-section
//! scroll tracking never interferes with the page-level easing.

use std::time::Duration;

/// Duration of one ease toward the target, in seconds.
const EASE_DURATION: f64 = 1.0;

/// Exponential ease-out over `[0, 1]`, capped so the ease lands exactly on
/// its target.
fn ease(t: f64) -> f64 {
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

/// Smoothly eased scroll position over a page of fixed height. Retargeting
/// restarts the ease from the current position; the offset never leaves
/// `[0, max_offset]` and never overshoots the target.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    origin: f64,
    elapsed: f64,
    max_offset: f64,
}

impl SmoothScroll {
    pub fn new(max_offset: f64) -> Self {
        Self { current: 0.0, target: 0.0, origin: 0.0, elapsed: 0.0, max_offset: max_offset.max(0.0) }
    }

    /// Retarget the scroll position, clamped to the page bounds.
    pub fn scroll_to(&mut self, target: f64) {
        let clamped = target.clamp(0.0, self.max_offset);
        if clamped == self.target {
            return;
        }
        self.origin = self.current;
        self.elapsed = 0.0;
        self.target = clamped;
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.target + delta);
    }

    /// Advance the ease by `dt`. Idempotent once settled.
    pub fn tick(&mut self, dt: Duration) {
        if self.is_settled() {
            return;
        }
        self.elapsed += dt.as_secs_f64();
        let t = (self.elapsed / EASE_DURATION).min(1.0);
        self.current = self.origin + (self.target - self.origin) * ease(t);
        if t >= 1.0 {
            self.current = self.target;
        }
    }

    /// The eased offset samplers read.
    pub fn offset(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }
}
