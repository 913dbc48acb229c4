use std::{fmt, panic::Location, str::FromStr};

use error_location::ErrorLocation;

use crate::{error::EngineError, gesture::FingerSignature};

/// Named hand gestures recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// All five fingers extended; the arming gesture.
    OpenPalm,
    /// No fingers extended; the deactivation gesture.
    Fist,
    /// Thumb only; reserved, never mapped to an action.
    ThumbsUp,
    /// Index only.
    OneFinger,
    /// Index and middle.
    TwoFingers,
    /// Index, middle and ring.
    ThreeFingers,
    /// Ring and pinky with index and middle folded.
    RingAndPinky,
    /// Pinky only.
    Pinky,
    /// No pattern matched.
    Unknown,
}

/// Gestures with protocol meaning that must never trigger a mapped action.
///
/// The trigger check is the single consumer of this set.
pub const RESERVED_GESTURES: [Gesture; 4] = [
    Gesture::OpenPalm,
    Gesture::Fist,
    Gesture::Unknown,
    Gesture::ThumbsUp,
];

impl Gesture {
    /// Classifies a finger signature against the ordered pattern table.
    ///
    /// Patterns are evaluated most-specific first and the first match wins;
    /// the ordering is load-bearing (a three-finger signature must not fall
    /// through to a looser pattern). Unmatched signatures classify as
    /// [`Gesture::Unknown`].
    pub fn from_signature(signature: FingerSignature) -> Self {
        PATTERNS
            .iter()
            .find(|pattern| pattern.matches(signature))
            .map_or(Self::Unknown, |pattern| pattern.gesture)
    }

    /// Whether this gesture belongs to [`RESERVED_GESTURES`].
    pub fn is_reserved(self) -> bool {
        RESERVED_GESTURES.contains(&self)
    }

    /// Stable snake_case form used in configuration and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenPalm => "open_palm",
            Self::Fist => "fist",
            Self::ThumbsUp => "thumbs_up",
            Self::OneFinger => "one_finger",
            Self::TwoFingers => "two_fingers",
            Self::ThreeFingers => "three_fingers",
            Self::RingAndPinky => "ring_and_pinky",
            Self::Pinky => "pinky",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gesture {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open_palm" => Ok(Self::OpenPalm),
            "fist" => Ok(Self::Fist),
            "thumbs_up" => Ok(Self::ThumbsUp),
            "one_finger" => Ok(Self::OneFinger),
            "two_fingers" => Ok(Self::TwoFingers),
            "three_fingers" => Ok(Self::ThreeFingers),
            "ring_and_pinky" => Ok(Self::RingAndPinky),
            "pinky" => Ok(Self::Pinky),
            "unknown" => Ok(Self::Unknown),
            _ => Err(EngineError::UnknownGesture {
                label: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// One row of the pattern table: a partial predicate over the five fingers.
/// `None` means "don't care".
struct GesturePattern {
    gesture: Gesture,
    thumb: Option<bool>,
    index: Option<bool>,
    middle: Option<bool>,
    ring: Option<bool>,
    pinky: Option<bool>,
}

impl GesturePattern {
    fn matches(&self, signature: FingerSignature) -> bool {
        finger_matches(self.thumb, signature.thumb)
            && finger_matches(self.index, signature.index)
            && finger_matches(self.middle, signature.middle)
            && finger_matches(self.ring, signature.ring)
            && finger_matches(self.pinky, signature.pinky)
    }
}

fn finger_matches(expected: Option<bool>, actual: bool) -> bool {
    expected.is_none_or(|value| value == actual)
}

// Full-hand patterns precede the thumb-wildcard patterns so a signature can
// never resolve to a looser row than it satisfies.
const PATTERNS: [GesturePattern; 8] = [
    GesturePattern {
        gesture: Gesture::OpenPalm,
        thumb: Some(true),
        index: Some(true),
        middle: Some(true),
        ring: Some(true),
        pinky: Some(true),
    },
    GesturePattern {
        gesture: Gesture::Fist,
        thumb: Some(false),
        index: Some(false),
        middle: Some(false),
        ring: Some(false),
        pinky: Some(false),
    },
    GesturePattern {
        gesture: Gesture::ThumbsUp,
        thumb: Some(true),
        index: Some(false),
        middle: Some(false),
        ring: Some(false),
        pinky: Some(false),
    },
    GesturePattern {
        gesture: Gesture::ThreeFingers,
        thumb: None,
        index: Some(true),
        middle: Some(true),
        ring: Some(true),
        pinky: Some(false),
    },
    GesturePattern {
        gesture: Gesture::TwoFingers,
        thumb: None,
        index: Some(true),
        middle: Some(true),
        ring: Some(false),
        pinky: Some(false),
    },
    GesturePattern {
        gesture: Gesture::RingAndPinky,
        thumb: None,
        index: Some(false),
        middle: Some(false),
        ring: Some(true),
        pinky: Some(true),
    },
    GesturePattern {
        gesture: Gesture::OneFinger,
        thumb: None,
        index: Some(true),
        middle: Some(false),
        ring: Some(false),
        pinky: Some(false),
    },
    GesturePattern {
        gesture: Gesture::Pinky,
        thumb: None,
        index: Some(false),
        middle: Some(false),
        ring: Some(false),
        pinky: Some(true),
    },
];
