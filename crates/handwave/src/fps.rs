use std::time::{Duration, Instant};

/// Measures instantaneous frame rate from the gap between updates.
///
/// A zero gap between two updates keeps the previous reading instead of
/// producing an infinite rate.
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    prev: Instant,
    fps: f64,
}

impl FpsCounter {
    /// Create a counter anchored at the current instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a counter anchored at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            prev: start,
            fps: 0.0,
        }
    }

    /// Record a frame at the current instant and return the updated rate.
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    /// Record a frame at `now` and return the updated rate.
    pub fn update_at(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.prev);

        if elapsed > Duration::ZERO {
            self.fps = 1.0 / elapsed.as_secs_f64();
        }

        self.prev = now;
        self.fps
    }

    /// The most recent rate reading.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}
