use std::time::{Duration, Instant};

/// Frame pacing with a smoothed FPS readout.
#[derive(Debug)]
pub struct FrameTiming {
    /// Minimum time between frame starts.
    frame_interval: Duration,
    /// Start of the current frame.
    frame_start: Instant,
    /// Smoothed FPS using exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl FrameTiming {
    /// Create a frame timer for the given target rate (at least 1 FPS).
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.max(1);
        Self {
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            frame_start: Instant::now(),
            smoothed_fps: target_fps as f32,
            smoothing: 0.05,
        }
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Call at the start of each frame.
    pub fn start_frame(&mut self) {
        self.start_frame_at(Instant::now());
    }

    fn start_frame_at(&mut self, now: Instant) {
        let frame_time = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps =
                self.smoothed_fps * (1.0 - self.smoothing) + instant_fps * self.smoothing;
        }
    }

    /// Time left before the next frame is due.
    pub fn time_until_next_frame(&self) -> Duration {
        self.frame_interval.saturating_sub(self.frame_start.elapsed())
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
