use crate::{
    AppError, AppResult,
    config::{default_cooldown_duration, default_open_palm_duration, default_stability_threshold},
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use handwave_core::EngineConfig;
use serde::{Deserialize, Serialize};

/// Activation state machine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// How long an open palm must be held before the hand arms, in seconds.
    #[serde(default = "default_open_palm_duration")]
    pub open_palm_duration: f64,
    /// Minimum gap between repeats of the same action, in seconds.
    #[serde(default = "default_cooldown_duration")]
    pub cooldown_duration: f64,
    /// Consecutive identical frames required before a gesture triggers.
    #[serde(default = "default_stability_threshold")]
    pub stability_threshold: u32,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            open_palm_duration: default_open_palm_duration(),
            cooldown_duration: default_cooldown_duration(),
            stability_threshold: default_stability_threshold(),
        }
    }
}

impl ActivationConfig {
    /// Convert the configured timings into an engine configuration.
    ///
    /// Rejects negative and non-finite durations here; zero durations and
    /// thresholds are left for the engine's own validation.
    #[track_caller]
    pub fn to_engine_config(&self) -> AppResult<EngineConfig> {
        let open_palm_duration =
            duration_from_seconds(self.open_palm_duration, "activation.open_palm_duration")?;
        let cooldown_duration =
            duration_from_seconds(self.cooldown_duration, "activation.cooldown_duration")?;

        Ok(EngineConfig {
            open_palm_duration,
            cooldown_duration,
            stability_threshold: self.stability_threshold,
        })
    }
}

#[track_caller]
fn duration_from_seconds(seconds: f64, field: &str) -> AppResult<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|e| AppError::ConfigError {
        reason: format!("Invalid {}: {}", field, e),
        location: ErrorLocation::from(Location::caller()),
    })
}
