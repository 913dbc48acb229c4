use crate::{AppError, AppResult, config::default_frame_rate};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Recorded landmark playback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Playback rate for recordings, in frames per second.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
        }
    }
}

impl ReplayConfig {
    /// Interval between frames at the configured playback rate.
    #[track_caller]
    pub fn frame_interval(&self) -> AppResult<Duration> {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(AppError::ConfigError {
                reason: format!(
                    "replay.frame_rate must be a positive number, got {}",
                    self.frame_rate
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Duration::try_from_secs_f64(1.0 / self.frame_rate).map_err(|e| AppError::ConfigError {
            reason: format!("Invalid replay.frame_rate: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
