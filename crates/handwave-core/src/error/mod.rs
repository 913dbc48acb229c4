use error_location::ErrorLocation;
use thiserror::Error;

/// Gesture engine errors with source location tracking.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine configuration rejected at construction.
    #[error("Invalid engine configuration: {reason} {location}")]
    InvalidConfig {
        /// Description of the rejected setting.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Hand side label not recognized.
    #[error("Unknown hand side: {label:?} {location}")]
    UnknownHandSide {
        /// The unrecognized label.
        label: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Gesture name not recognized.
    #[error("Unknown gesture: {label:?} {location}")]
    UnknownGesture {
        /// The unrecognized name.
        label: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
