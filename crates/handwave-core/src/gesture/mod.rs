mod classifier;
mod landmarks;

pub use {
    classifier::{Gesture, RESERVED_GESTURES},
    landmarks::{FingerSignature, HandSide, Landmark, LANDMARK_COUNT},
};
