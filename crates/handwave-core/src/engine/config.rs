use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;

use crate::error::{EngineError, Result as CoreResult};

/// Default hold time for the open-palm arming gesture.
pub const DEFAULT_OPEN_PALM_DURATION: Duration = Duration::from_secs(2);
/// Default minimum gap between two triggers of the same gesture.
pub const DEFAULT_COOLDOWN_DURATION: Duration = Duration::from_secs(1);
/// Default consecutive-frame count required before a gesture is stable.
pub const DEFAULT_STABILITY_THRESHOLD: u32 = 10;

/// Timing and stability parameters for the activation protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long OpenPalm must be held continuously before a channel arms.
    pub open_palm_duration: Duration,
    /// Minimum elapsed time before the same gesture may trigger again.
    /// Zero disables the cooldown entirely.
    pub cooldown_duration: Duration,
    /// Consecutive identical frames required before a gesture is stable.
    pub stability_threshold: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            open_palm_duration: DEFAULT_OPEN_PALM_DURATION,
            cooldown_duration: DEFAULT_COOLDOWN_DURATION,
            stability_threshold: DEFAULT_STABILITY_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Rejects parameter combinations the protocol cannot run with.
    ///
    /// Called by the engine constructors so a bad configuration fails before
    /// any frame is processed.
    #[track_caller]
    pub fn validate(&self) -> CoreResult<()> {
        if self.open_palm_duration.is_zero() {
            return Err(EngineError::InvalidConfig {
                reason: "open_palm_duration must be greater than zero".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.stability_threshold == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "stability_threshold must be at least 1".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}
