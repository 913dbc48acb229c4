use std::collections::HashMap;

use crate::gesture::{Gesture, HandSide};

/// Per-side gesture-to-action tables consulted when a stable trigger fires.
///
/// The engine reads the map; it never mutates it. Callers may swap in a new
/// map between frames via [`crate::GestureEngine::set_action_map`], and each
/// frame's lookups see exactly one map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GestureActionMap {
    left: HashMap<Gesture, String>,
    right: HashMap<Gesture, String>,
}

impl GestureActionMap {
    /// Creates an empty map: every trigger resolves to no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the stock media-control layout.
    ///
    /// Right hand launches and skips; left hand adjusts playback.
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        map.bind(HandSide::Right, Gesture::OneFinger, "open_brave");
        map.bind(HandSide::Right, Gesture::TwoFingers, "open_spotify");
        map.bind(HandSide::Right, Gesture::RingAndPinky, "next_song");
        map.bind(HandSide::Right, Gesture::Pinky, "previous_song");
        map.bind(HandSide::Left, Gesture::OneFinger, "volume_up");
        map.bind(HandSide::Left, Gesture::TwoFingers, "volume_down");
        map.bind(HandSide::Left, Gesture::ThreeFingers, "mute");
        map.bind(HandSide::Left, Gesture::Pinky, "play_pause");
        map
    }

    /// Binds `gesture` on `side` to an action identifier, replacing any
    /// existing binding for that pair.
    pub fn bind(&mut self, side: HandSide, gesture: Gesture, action: impl Into<String>) {
        self.side_map_mut(side).insert(gesture, action.into());
    }

    /// Removes the binding for `gesture` on `side`; returns whether one
    /// existed.
    pub fn unbind(&mut self, side: HandSide, gesture: Gesture) -> bool {
        self.side_map_mut(side).remove(&gesture).is_some()
    }

    /// Looks up the action identifier for a gesture on one side.
    pub fn action_for(&self, side: HandSide, gesture: Gesture) -> Option<&str> {
        self.side_map(side).get(&gesture).map(String::as_str)
    }

    /// Total number of bindings across both sides.
    pub fn binding_count(&self) -> usize {
        self.left.len() + self.right.len()
    }

    fn side_map(&self, side: HandSide) -> &HashMap<Gesture, String> {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    fn side_map_mut(&mut self, side: HandSide) -> &mut HashMap<Gesture, String> {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }
}
