mod actions_config;
mod activation_config;
mod apps_config;
#[allow(clippy::module_inception)]
mod config;
mod replay_config;

pub(crate) use {
    actions_config::ActionsConfig, activation_config::ActivationConfig, apps_config::AppsConfig,
    config::Config, replay_config::ReplayConfig,
};

use std::collections::BTreeMap;

use handwave_core::{
    DEFAULT_COOLDOWN_DURATION, DEFAULT_OPEN_PALM_DURATION, DEFAULT_STABILITY_THRESHOLD,
};

pub(crate) const DEFAULT_FRAME_RATE: f64 = 30.0;

pub(crate) fn default_open_palm_duration() -> f64 {
    DEFAULT_OPEN_PALM_DURATION.as_secs_f64()
}

pub(crate) fn default_cooldown_duration() -> f64 {
    DEFAULT_COOLDOWN_DURATION.as_secs_f64()
}

pub(crate) fn default_stability_threshold() -> u32 {
    DEFAULT_STABILITY_THRESHOLD
}

pub(crate) fn default_frame_rate() -> f64 {
    DEFAULT_FRAME_RATE
}

pub(crate) fn default_right_actions() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("one_finger".to_string(), "open_brave".to_string()),
        ("two_fingers".to_string(), "open_spotify".to_string()),
        ("ring_and_pinky".to_string(), "next_song".to_string()),
        ("pinky".to_string(), "previous_song".to_string()),
    ])
}

pub(crate) fn default_left_actions() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("one_finger".to_string(), "volume_up".to_string()),
        ("two_fingers".to_string(), "volume_down".to_string()),
        ("three_fingers".to_string(), "mute".to_string()),
        ("pinky".to_string(), "play_pause".to_string()),
    ])
}
