//! Per-hand activation protocol.
//!
//! Each detected hand side owns one [`HandChannel`] holding the activation
//! state machine, the stability debounce, and the cooldown bookkeeping. The
//! engine advances a channel exactly once per frame with that side's
//! classified gesture (or `None` when the hand was not seen).

use std::fmt;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    engine::EngineConfig,
    gesture::{Gesture, HandSide},
};

/// Activation protocol states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationState {
    /// Not armed; only OpenPalm is meaningful.
    #[default]
    Inactive,
    /// OpenPalm seen; the arming hold timer is running.
    Activating,
    /// Armed; stable non-reserved gestures may trigger actions.
    Active,
}

impl ActivationState {
    /// Stable lowercase form used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Activating => "activating",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for ActivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of one channel, published alongside its twin as an
/// [`crate::EngineSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelSnapshot {
    /// Current protocol state.
    pub state: ActivationState,
    /// Most recent classified gesture, if any.
    pub last_gesture: Option<Gesture>,
    /// Length of the current run of identical frames.
    pub stable_count: u32,
    /// Arming progress in `0.0..=1.0`; 1.0 once active.
    pub activation_progress: f32,
    /// Whether a new trigger of the last-fired gesture is still blocked.
    pub in_cooldown: bool,
}

/// One hand side's persistent activation state.
///
/// Created lazily on the first observation of its side and kept for the rest
/// of the session. Nothing here survives a restart.
#[derive(Debug)]
pub(crate) struct HandChannel {
    side: HandSide,
    state: ActivationState,
    activation_started_at: Option<Instant>,
    last_gesture: Option<Gesture>,
    stable_count: u32,
    last_triggered_gesture: Option<Gesture>,
    last_action_at: Option<Instant>,
}

impl HandChannel {
    pub(crate) fn new(side: HandSide) -> Self {
        debug!(side = %side, "hand channel created");
        Self {
            side,
            state: ActivationState::Inactive,
            activation_started_at: None,
            last_gesture: None,
            stable_count: 0,
            last_triggered_gesture: None,
            last_action_at: None,
        }
    }

    pub(crate) fn state(&self) -> ActivationState {
        self.state
    }

    /// Advances the protocol by one frame and reports any stable trigger.
    ///
    /// `gesture` is `None` when this side was not detected this frame. The
    /// returned gesture, if any, has passed the stability, reserved-set and
    /// cooldown checks; mapping it to an action is the caller's concern.
    pub(crate) fn advance(
        &mut self,
        gesture: Option<Gesture>,
        now: Instant,
        config: &EngineConfig,
    ) -> Option<Gesture> {
        match self.state {
            ActivationState::Inactive => {
                if gesture == Some(Gesture::OpenPalm) {
                    self.state = ActivationState::Activating;
                    self.activation_started_at = Some(now);
                    debug!(side = %self.side, "arming hold started");
                }
            }
            ActivationState::Activating => {
                if gesture == Some(Gesture::OpenPalm) {
                    let started = self.activation_started_at.unwrap_or(now);
                    if now.saturating_duration_since(started) >= config.open_palm_duration {
                        self.state = ActivationState::Active;
                        self.activation_started_at = None;
                        info!(side = %self.side, "channel armed");
                    }
                } else {
                    // Losing the arming gesture forfeits all held progress.
                    self.state = ActivationState::Inactive;
                    self.activation_started_at = None;
                    debug!(side = %self.side, "arming hold released");
                }
            }
            ActivationState::Active => {
                if gesture == Some(Gesture::Fist) {
                    self.reset();
                    info!(side = %self.side, "channel deactivated");
                    return None;
                }
            }
        }

        if self.state != ActivationState::Active {
            return None;
        }

        // Debounce: identical consecutive frames grow the run; any change
        // restarts it with the changed frame as the first observation. A lost
        // hand clears the run without touching the armed state.
        if gesture.is_some() && gesture == self.last_gesture {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.last_gesture = gesture;
            self.stable_count = u32::from(gesture.is_some());
        }

        let candidate = gesture.filter(|g| !g.is_reserved())?;
        if self.stable_count < config.stability_threshold {
            return None;
        }

        // A changed gesture may fire straight through an open cooldown window.
        let repeat = self.last_triggered_gesture == Some(candidate);
        if repeat && self.in_cooldown(now, config.cooldown_duration) {
            return None;
        }

        self.last_triggered_gesture = Some(candidate);
        self.last_action_at = Some(now);
        self.stable_count = 0;
        debug!(side = %self.side, gesture = %candidate, "stable trigger");
        Some(candidate)
    }

    /// Returns to `Inactive` with every counter and timestamp cleared.
    pub(crate) fn reset(&mut self) {
        self.state = ActivationState::Inactive;
        self.activation_started_at = None;
        self.last_gesture = None;
        self.stable_count = 0;
        self.last_triggered_gesture = None;
        self.last_action_at = None;
    }

    pub(crate) fn in_cooldown(&self, now: Instant, cooldown: Duration) -> bool {
        self.last_action_at
            .is_some_and(|at| now.saturating_duration_since(at) < cooldown)
    }

    pub(crate) fn snapshot(&self, now: Instant, config: &EngineConfig) -> ChannelSnapshot {
        ChannelSnapshot {
            state: self.state,
            last_gesture: self.last_gesture,
            stable_count: self.stable_count,
            activation_progress: self.activation_progress(now, config.open_palm_duration),
            in_cooldown: self.in_cooldown(now, config.cooldown_duration),
        }
    }

    fn activation_progress(&self, now: Instant, open_palm_duration: Duration) -> f32 {
        match self.state {
            ActivationState::Inactive => 0.0,
            ActivationState::Active => 1.0,
            ActivationState::Activating => {
                let Some(started) = self.activation_started_at else {
                    return 0.0;
                };
                let elapsed = now.saturating_duration_since(started).as_secs_f32();
                (elapsed / open_palm_duration.as_secs_f32()).min(1.0)
            }
        }
    }
}
