use crate::{
    AppResult,
    config::{default_left_actions, default_right_actions},
};

use std::collections::BTreeMap;

use handwave_core::{Gesture, GestureActionMap, HandSide};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Gesture to action bindings, keyed by gesture name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionsConfig {
    /// Right-hand bindings.
    #[serde(default = "default_right_actions")]
    pub right: BTreeMap<String, String>,
    /// Left-hand bindings.
    #[serde(default = "default_left_actions")]
    pub left: BTreeMap<String, String>,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            right: default_right_actions(),
            left: default_left_actions(),
        }
    }
}

impl ActionsConfig {
    /// Resolve the configured gesture names into an action map.
    ///
    /// Unknown gesture names are an error. Bindings on reserved gestures
    /// are skipped with a warning because the engine never emits them as
    /// action triggers.
    #[track_caller]
    pub fn to_action_map(&self) -> AppResult<GestureActionMap> {
        let mut map = GestureActionMap::new();

        for (side, bindings) in [(HandSide::Left, &self.left), (HandSide::Right, &self.right)] {
            for (name, action) in bindings {
                let gesture: Gesture = name.parse()?;

                if gesture.is_reserved() {
                    warn!(
                        side = %side,
                        gesture = %gesture,
                        action = %action,
                        "Ignoring binding on reserved gesture"
                    );
                    continue;
                }

                map.bind(side, gesture, action.clone());
            }
        }

        Ok(map)
    }
}
