use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;

use crate::error::EngineError;

/// Number of landmark points delivered per detected hand.
pub const LANDMARK_COUNT: usize = 21;

// Landmark indices in the detector's hand topology.
const WRIST: usize = 0;
const THUMB_IP: usize = 3;
const THUMB_TIP: usize = 4;
const INDEX_PIP: usize = 6;
const INDEX_TIP: usize = 8;
const MIDDLE_PIP: usize = 10;
const MIDDLE_TIP: usize = 12;
const RING_PIP: usize = 14;
const RING_TIP: usize = 16;
const PINKY_PIP: usize = 18;
const PINKY_TIP: usize = 20;

/// One normalized 3D landmark point.
///
/// Coordinates are in the detector's normalized image space: x grows rightward,
/// y grows downward, both nominally in `0.0..=1.0`. z is carried through but
/// plays no part in extension tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (smaller is higher on screen).
    pub y: f32,
    /// Relative depth.
    pub z: f32,
}

impl Landmark {
    /// Creates a landmark point.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Which hand an observation belongs to, as labeled by the detector.
///
/// The side is a channel key only; handedness is never inferred here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    /// The detector's left-hand label.
    Left,
    /// The detector's right-hand label.
    Right,
}

impl HandSide {
    /// Stable lowercase form used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for HandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandSide {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(EngineError::UnknownHandSide {
                label: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Per-finger extension flags derived from one frame's landmark geometry.
///
/// A fresh value type computed every frame; all temporal smoothing lives in the
/// activation layer, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerSignature {
    /// Thumb extended.
    pub thumb: bool,
    /// Index finger extended.
    pub index: bool,
    /// Middle finger extended.
    pub middle: bool,
    /// Ring finger extended.
    pub ring: bool,
    /// Pinky extended.
    pub pinky: bool,
}

impl FingerSignature {
    /// Derives the signature from a full set of hand landmarks.
    ///
    /// The thumb counts as extended when its tip sits farther from the wrist
    /// horizontally than its IP joint does. Comparing absolute distances keeps
    /// the test identical under horizontal mirroring, so it holds for either
    /// hand and for flipped camera feeds. The remaining fingers count as
    /// extended when the fingertip is strictly higher on screen than its PIP
    /// joint.
    pub fn from_landmarks(landmarks: &[Landmark; LANDMARK_COUNT]) -> Self {
        let wrist_x = landmarks[WRIST].x;
        let tip_reach = (landmarks[THUMB_TIP].x - wrist_x).abs();
        let ip_reach = (landmarks[THUMB_IP].x - wrist_x).abs();

        Self {
            thumb: tip_reach > ip_reach,
            index: finger_extended(landmarks, INDEX_TIP, INDEX_PIP),
            middle: finger_extended(landmarks, MIDDLE_TIP, MIDDLE_PIP),
            ring: finger_extended(landmarks, RING_TIP, RING_PIP),
            pinky: finger_extended(landmarks, PINKY_TIP, PINKY_PIP),
        }
    }

    /// Number of fingers currently counted as extended.
    pub fn extended_count(self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .into_iter()
            .filter(|extended| *extended)
            .count()
    }
}

fn finger_extended(landmarks: &[Landmark; LANDMARK_COUNT], tip: usize, pip: usize) -> bool {
    landmarks[tip].y < landmarks[pip].y
}
