//! Handwave Core Library
//!
//! Real-time hand-gesture recognition and activation gating: finger-extension
//! signatures from raw landmark geometry, ordered-pattern gesture classification,
//! and a per-hand activation state machine (timed open-palm arming, stability
//! debounce, cooldown) with dual-hand arbitration.
//!
//! # Example
//!
//! ```
//! use handwave_core::{FingerSignature, Gesture};
//!
//! let signature = FingerSignature {
//!     thumb: false,
//!     index: true,
//!     middle: true,
//!     ring: false,
//!     pinky: false,
//! };
//!
//! assert_eq!(Gesture::from_signature(signature), Gesture::TwoFingers);
//! ```
//!
//! The stateful surface is [`GestureEngine`]: feed it each frame's detected hands
//! via [`GestureEngine::process_frame`] and execute the returned
//! [`ActionRequest`]s.

mod clock;
mod engine;
mod error;
mod gesture;

pub use {
    clock::{Clock, ManualClock, SystemClock},
    engine::{
        ActionRequest, ActivationState, ChannelSnapshot, DEFAULT_COOLDOWN_DURATION,
        DEFAULT_OPEN_PALM_DURATION, DEFAULT_STABILITY_THRESHOLD, EngineConfig, EngineSnapshot,
        GestureActionMap, GestureEngine, HandObservation,
    },
    error::{EngineError, Result as CoreResult},
    gesture::{FingerSignature, Gesture, HandSide, Landmark, LANDMARK_COUNT, RESERVED_GESTURES},
};
