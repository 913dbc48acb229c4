use std::{sync::Arc, time::Instant};

use tracing::{debug, info, instrument, warn};

use crate::{
    clock::{Clock, SystemClock},
    engine::{
        ActivationState, ChannelSnapshot, EngineConfig, GestureActionMap, channel::HandChannel,
    },
    error::Result as CoreResult,
    gesture::{FingerSignature, Gesture, HandSide, LANDMARK_COUNT, Landmark},
};

/// One detected hand as delivered by the landmark source for a single frame.
#[derive(Debug, Clone)]
pub struct HandObservation {
    /// Which hand this is, as labeled by the detector.
    pub side: HandSide,
    /// The hand's landmark points; exactly [`LANDMARK_COUNT`] entries.
    pub landmarks: Vec<Landmark>,
}

/// An authorized intent to perform one mapped action.
///
/// Emitted at most twice per frame and handed straight to the executor; the
/// engine never queues or retries one.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    /// The channel that fired.
    pub side: HandSide,
    /// The stable gesture that fired.
    pub gesture: Gesture,
    /// The mapped action identifier.
    pub action: String,
    /// When the trigger was accepted.
    pub at: Instant,
}

/// Read-only view of both channels at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineSnapshot {
    /// Left-hand channel view; default when that side was never seen.
    pub left: ChannelSnapshot,
    /// Right-hand channel view; default when that side was never seen.
    pub right: ChannelSnapshot,
}

/// The dual-hand gesture engine: classification, per-side activation
/// protocol, and frame-level arbitration behind one entry point.
///
/// The right channel is the canonical arming and deactivation channel; the
/// left channel is a secondary lane that, while both hands are visible, only
/// fires when the right channel is armed, out of cooldown, and showing a
/// different gesture. A left hand on its own drives its channel without the
/// gate.
pub struct GestureEngine {
    config: EngineConfig,
    action_map: GestureActionMap,
    clock: Arc<dyn Clock>,
    left: Option<HandChannel>,
    right: Option<HandChannel>,
}

impl GestureEngine {
    /// Creates an engine on the system clock.
    ///
    /// Fails fast if `config` is invalid; no frame is ever processed with a
    /// bad configuration.
    #[track_caller]
    pub fn new(config: EngineConfig, action_map: GestureActionMap) -> CoreResult<Self> {
        Self::with_clock(config, action_map, Arc::new(SystemClock))
    }

    /// Creates an engine on an injected clock.
    #[track_caller]
    pub fn with_clock(
        config: EngineConfig,
        action_map: GestureActionMap,
        clock: Arc<dyn Clock>,
    ) -> CoreResult<Self> {
        config.validate()?;
        info!(
            open_palm_ms = config.open_palm_duration.as_millis(),
            cooldown_ms = config.cooldown_duration.as_millis(),
            stability_threshold = config.stability_threshold,
            bindings = action_map.binding_count(),
            "gesture engine ready"
        );
        Ok(Self {
            config,
            action_map,
            clock,
            left: None,
            right: None,
        })
    }

    /// The engine's timing and stability parameters.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the action map between frames.
    #[instrument(skip(self, action_map))]
    pub fn set_action_map(&mut self, action_map: GestureActionMap) {
        info!(bindings = action_map.binding_count(), "action map replaced");
        self.action_map = action_map;
    }

    /// Processes one frame of detector output and returns the zero, one, or
    /// two action requests it authorizes.
    ///
    /// Hands with a malformed landmark set are rejected individually and
    /// treated as not detected this frame; the other channel is untouched.
    /// Channels whose side went undetected are still advanced with "no hand"
    /// so arming timers stay honest.
    pub fn process_frame(&mut self, hands: &[HandObservation]) -> Vec<ActionRequest> {
        let now = self.clock.now();

        let mut left_gesture = None;
        let mut right_gesture = None;
        for hand in hands {
            let Ok(landmarks) = <&[Landmark; LANDMARK_COUNT]>::try_from(hand.landmarks.as_slice())
            else {
                warn!(
                    side = %hand.side,
                    landmarks = hand.landmarks.len(),
                    "rejecting hand with malformed landmark set"
                );
                continue;
            };
            let signature = FingerSignature::from_landmarks(landmarks);
            let gesture = Gesture::from_signature(signature);
            // Duplicate side labels: the last observation wins.
            match hand.side {
                HandSide::Left => left_gesture = Some(gesture),
                HandSide::Right => right_gesture = Some(gesture),
            }
        }

        // The left-lane gate reads the right channel's cooldown as it stood
        // when the frame began, so a right trigger this frame does not
        // suppress a simultaneous left trigger.
        let right_was_in_cooldown = self
            .right
            .as_ref()
            .is_some_and(|channel| channel.in_cooldown(now, self.config.cooldown_duration));

        let right_trigger = Self::advance_channel(
            &mut self.right,
            HandSide::Right,
            right_gesture,
            now,
            &self.config,
        );
        let left_trigger = Self::advance_channel(
            &mut self.left,
            HandSide::Left,
            left_gesture,
            now,
            &self.config,
        );

        let mut requests = Vec::new();
        if let Some(gesture) = right_trigger {
            self.push_request(&mut requests, HandSide::Right, gesture, now);
        }
        if let Some(gesture) = left_trigger {
            let honored = match right_gesture {
                // Left is the only visible hand: it drives itself.
                None => true,
                // Both hands visible: left fires only alongside an armed,
                // non-cooling right channel showing a different gesture.
                Some(right_gesture) => {
                    let right_active = self
                        .right
                        .as_ref()
                        .is_some_and(|channel| channel.state() == ActivationState::Active);
                    right_active && !right_was_in_cooldown && gesture != right_gesture
                }
            };
            if honored {
                self.push_request(&mut requests, HandSide::Left, gesture, now);
            } else {
                debug!(gesture = %gesture, "left trigger suppressed by arbitration");
            }
        }
        requests
    }

    /// Current per-side view, safe to publish to a presentation consumer.
    pub fn snapshot(&self) -> EngineSnapshot {
        let now = self.clock.now();
        EngineSnapshot {
            left: self
                .left
                .as_ref()
                .map(|channel| channel.snapshot(now, &self.config))
                .unwrap_or_default(),
            right: self
                .right
                .as_ref()
                .map(|channel| channel.snapshot(now, &self.config))
                .unwrap_or_default(),
        }
    }

    /// Forces both channels back to `Inactive` with cleared counters.
    pub fn reset(&mut self) {
        self.reset_side(HandSide::Left);
        self.reset_side(HandSide::Right);
    }

    /// Forces one channel back to `Inactive` with cleared counters.
    pub fn reset_side(&mut self, side: HandSide) {
        let slot = match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        };
        if let Some(channel) = slot {
            channel.reset();
            info!(side = %side, "channel reset");
        }
    }

    fn advance_channel(
        slot: &mut Option<HandChannel>,
        side: HandSide,
        gesture: Option<Gesture>,
        now: Instant,
        config: &EngineConfig,
    ) -> Option<Gesture> {
        match gesture {
            // Channels come into being on the first sighting of their side.
            Some(_) => slot
                .get_or_insert_with(|| HandChannel::new(side))
                .advance(gesture, now, config),
            None => slot
                .as_mut()
                .and_then(|channel| channel.advance(None, now, config)),
        }
    }

    fn push_request(
        &self,
        requests: &mut Vec<ActionRequest>,
        side: HandSide,
        gesture: Gesture,
        now: Instant,
    ) {
        match self.action_map.action_for(side, gesture) {
            Some(action) => {
                info!(side = %side, gesture = %gesture, action = %action, "action request");
                requests.push(ActionRequest {
                    side,
                    gesture,
                    action: action.to_string(),
                    at: now,
                });
            }
            None => {
                debug!(side = %side, gesture = %gesture, "stable gesture has no mapped action");
            }
        }
    }
}
