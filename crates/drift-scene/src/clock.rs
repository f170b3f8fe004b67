//! Pausable animation clock.

use std::time::{Duration, Instant};

/// Clock units per millisecond of unpaused wall time.
pub const TIME_SCALE: f64 = 0.0001;

/// Monotonic clock that stands still while paused.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Current clock value `t`.
    pub fn now(&self) -> f64 {
        self.value_at(Instant::now())
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let now = self.paused_at.unwrap_or(now);
        let running = now
            .saturating_duration_since(self.origin)
            .saturating_sub(self.paused_total);
        running.as_secs_f64() * 1000.0 * TIME_SCALE
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn resume(&mut self) {
        self.resume_at(Instant::now());
    }

    pub fn pause_at(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume_at(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }
}
