mod action_map;
mod arbiter;
mod channel;
mod config;

#[cfg(test)]
pub(crate) use channel::HandChannel;

pub use {
    action_map::GestureActionMap,
    arbiter::{ActionRequest, EngineSnapshot, GestureEngine, HandObservation},
    channel::{ActivationState, ChannelSnapshot},
    config::{
        DEFAULT_COOLDOWN_DURATION, DEFAULT_OPEN_PALM_DURATION, DEFAULT_STABILITY_THRESHOLD,
        EngineConfig,
    },
};
