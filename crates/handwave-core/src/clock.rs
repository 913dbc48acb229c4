use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use tracing::error;

/// Monotonic time source for all arming and cooldown comparisons.
///
/// The engine never sleeps; it only compares elapsed time against configured
/// durations, so swapping the clock makes every timing path deterministic
/// under test.
pub trait Clock: Send + Sync {
    /// Current monotonic instant.
    fn now(&self) -> Instant;
}

/// Production clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic timing tests and replays.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        // Recover from lock poison: the held Instant is always valid.
        let mut now = self.now.lock().unwrap_or_else(|e| {
            error!("Manual clock lock poisoned, recovering: {}", e);
            e.into_inner()
        });
        *now += step;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|e| {
            error!("Manual clock lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        self.as_ref().now()
    }
}
