//! Frame clock for the game loop.

use std::time::Instant;

/// Tracks elapsed time and the delta of the current frame.
///
/// Exactly one of [`Clock::tick`], [`Clock::tick_to`] or [`Clock::advance`] is called per
/// frame, before anything reads time. [`Clock::now`] and [`Clock::delta`] then stay fixed
/// until the next tick.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Wall-clock origin used by [`Clock::tick`].
    start_time: Instant,
    /// Seconds since start as of the current frame.
    elapsed: f64,
    /// Seconds between the previous frame and this one. Never negative.
    delta: f64,
    /// Frame count since start.
    frame_count: u64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
        }
    }

    /// Advance using the wall clock.
    pub fn tick(&mut self) {
        let now = self.start_time.elapsed().as_secs_f64();
        self.tick_to(now);
    }

    /// Advance to an externally supplied elapsed time (seconds since start).
    pub fn tick_to(&mut self, elapsed: f64) {
        let delta = elapsed - self.elapsed;
        if delta < 0.0 {
            log::debug!("Time source went backwards by {:.4}s, clamping delta", -delta);
            self.delta = 0.0;
        } else {
            self.delta = delta;
            self.elapsed = elapsed;
        }
        self.frame_count += 1;
    }

    /// Advance by a frame delta supplied by the timing collaborator.
    pub fn advance(&mut self, delta: f64) {
        self.tick_to(self.elapsed + delta.max(0.0));
    }

    /// Seconds since start as of the current frame.
    pub fn now(&self) -> f64 {
        self.elapsed
    }

    /// Seconds elapsed since the previous frame.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Delta as `f32`, for per-frame integration.
    pub fn delta_seconds(&self) -> f32 {
        self.delta as f32
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
