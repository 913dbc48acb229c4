//! Action execution for stable gesture triggers.
//!
//! Maps action identifiers produced by the gesture engine to media key
//! presses and external application launches.

use crate::{AppError, AppResult, config::AppsConfig};

use std::panic::Location;
use std::time::Duration;

use enigo::{Direction, Enigo, Key, Keyboard, Settings};
use error_location::ErrorLocation;
use handwave_core::ActionRequest;
use tracing::{debug, info, instrument, warn};

/// Delay before the key event in the media key simulation.
///
/// Some desktop environments drop synthetic media key events that arrive
/// immediately after the synthesizer is created. 10ms is the minimum
/// reliable interval.
const KEY_EVENT_DELAY: Duration = Duration::from_millis(10);

/// Executes action identifiers from stable gesture triggers.
pub struct ActionExecutor {
    pub(crate) apps: AppsConfig,
}

impl ActionExecutor {
    /// Create a new action executor.
    pub fn new(apps: AppsConfig) -> Self {
        info!(
            brave_configured = apps.brave_path.is_some(),
            spotify_configured = apps.spotify_path.is_some(),
            "Action executor ready"
        );

        Self { apps }
    }

    /// Execute one action request.
    ///
    /// Unknown identifiers and unconfigured launch paths are warnings, not
    /// errors, so one bad binding cannot take down the whole pipeline.
    #[instrument(skip(self, request), fields(action = %request.action, side = %request.side))]
    pub async fn execute(&self, request: &ActionRequest) -> AppResult<()> {
        match request.action.as_str() {
            "volume_up" => self.press_media_key(Key::VolumeUp).await,
            "volume_down" => self.press_media_key(Key::VolumeDown).await,
            "mute" => self.press_media_key(Key::VolumeMute).await,
            "play_pause" => self.press_media_key(Key::MediaPlayPause).await,
            "next_song" => self.press_media_key(Key::MediaNextTrack).await,
            "previous_song" => self.press_media_key(Key::MediaPrevTrack).await,
            "open_brave" => self.launch("Brave", self.apps.brave_path.as_deref()),
            "open_spotify" => self.launch("Spotify", self.apps.spotify_path.as_deref()),
            other => {
                warn!(action = %other, "Ignoring unknown action identifier");
                Ok(())
            }
        }
    }

    #[instrument(skip(self))]
    async fn press_media_key(&self, key: Key) -> AppResult<()> {
        // Media keys go through spawn_blocking since enigo operations are
        // synchronous and involve a small sleep for key event timing.
        //
        // NOTE: A new Enigo instance is created inside spawn_blocking because:
        // 1. Enigo is not Send, so it cannot be moved across thread boundaries
        // 2. spawn_blocking requires 'static + Send closure
        // 3. Enigo::new() is cheap (no heavy platform initialization)
        // This is intentional, not a bug.
        let press_result = tokio::task::spawn_blocking(move || {
            let mut enigo =
                Enigo::new(&Settings::default()).map_err(|e| AppError::KeySimulationFailed {
                    reason: format!("Failed to initialize key synthesis: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            std::thread::sleep(KEY_EVENT_DELAY);

            enigo
                .key(key, Direction::Click)
                .map_err(|e| AppError::KeySimulationFailed {
                    reason: format!("Failed to press {:?}: {}", key, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            Ok::<(), AppError>(())
        })
        .await
        .map_err(|e| AppError::KeySimulationFailed {
            reason: format!("Key press task panicked: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        press_result?;

        debug!(key = ?key, "Media key clicked");

        Ok(())
    }

    #[instrument(skip(self, path))]
    fn launch(&self, name: &str, path: Option<&str>) -> AppResult<()> {
        let Some(path) = path else {
            warn!(app = %name, "No launch path configured, skipping");
            return Ok(());
        };

        open::that_detached(path).map_err(|e| AppError::LaunchFailed {
            reason: format!("Failed to launch {} via {:?}: {}", name, path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(app = %name, path = %path, "Application launched");

        Ok(())
    }
}
