use serde::{Deserialize, Serialize};

/// External application launch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppsConfig {
    /// Path or command used to launch the Brave browser (None = unconfigured).
    #[serde(default)]
    pub brave_path: Option<String>,
    /// Path or command used to launch Spotify (None = unconfigured).
    #[serde(default)]
    pub spotify_path: Option<String>,
}
