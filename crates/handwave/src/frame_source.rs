//! Landmark frame sources for the pipeline.
//!
//! `FrameSource` is the seam where a live hand detector would plug in.
//! `RecordedFrames` is the shipped implementation: it replays a CSV
//! landmark recording frame by frame.

use crate::{AppError, AppResult};

use std::{
    collections::{BTreeMap, VecDeque},
    fs, io,
    panic::Location,
    path::Path,
};

use error_location::ErrorLocation;
use handwave_core::{HandObservation, HandSide, LANDMARK_COUNT, Landmark};
use serde::Deserialize;
use tracing::{info, instrument, warn};

/// A source of per-frame hand observations.
pub trait FrameSource {
    /// The hands detected in the next frame, or `None` once exhausted.
    ///
    /// An empty `Vec` is a valid frame in which no hands were detected.
    fn next_frame(&mut self) -> Option<Vec<HandObservation>>;
}

/// One row of a landmark recording.
#[derive(Debug, Deserialize)]
struct RecordRow {
    frame: u64,
    hand: String,
    landmark: usize,
    x: f32,
    y: f32,
    z: f32,
}

/// Landmarks collected for one hand of one frame while loading.
#[derive(Debug)]
struct PendingHand {
    slots: [Option<Landmark>; LANDMARK_COUNT],
    duplicate: bool,
}

impl Default for PendingHand {
    fn default() -> Self {
        Self {
            slots: [None; LANDMARK_COUNT],
            duplicate: false,
        }
    }
}

impl PendingHand {
    fn insert(&mut self, index: usize, landmark: Landmark) {
        if self.slots[index].is_some() {
            self.duplicate = true;
        }
        self.slots[index] = Some(landmark);
    }

    /// Assemble the hand, or skip it when the landmark set is incomplete.
    fn finish(self, frame: u64, side: HandSide) -> Option<Vec<Landmark>> {
        let present = self.slots.iter().filter(|slot| slot.is_some()).count();

        if self.duplicate || present != LANDMARK_COUNT {
            warn!(
                frame,
                side = %side,
                present,
                "Skipping hand with incomplete landmark set"
            );
            return None;
        }

        Some(self.slots.iter().flatten().copied().collect())
    }
}

/// Both hands of one frame while loading.
#[derive(Debug, Default)]
struct PendingFrame {
    left: Option<PendingHand>,
    right: Option<PendingHand>,
}

impl PendingFrame {
    fn hand_mut(&mut self, side: HandSide) -> &mut PendingHand {
        let slot = match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        };
        slot.get_or_insert_with(PendingHand::default)
    }

    fn finish(self, frame: u64) -> Vec<HandObservation> {
        let mut hands = Vec::new();

        for (side, pending) in [(HandSide::Left, self.left), (HandSide::Right, self.right)] {
            if let Some(landmarks) = pending.and_then(|hand| hand.finish(frame, side)) {
                hands.push(HandObservation { side, landmarks });
            }
        }

        hands
    }
}

/// A landmark recording replayed frame by frame.
///
/// Recordings are CSV files with a `frame,hand,landmark,x,y,z` header.
/// Frame numbering is dense: every number between the first and last
/// recorded frame is replayed, and numbers with no rows become frames
/// in which no hands were detected.
#[derive(Debug)]
pub struct RecordedFrames {
    frames: VecDeque<Vec<HandObservation>>,
    total_frames: usize,
}

impl RecordedFrames {
    /// Load a recording from a CSV file.
    #[track_caller]
    #[instrument]
    pub fn open(path: &Path) -> AppResult<Self> {
        let file = fs::File::open(path).map_err(|e| AppError::RecordingError {
            reason: format!("Failed to open recording {:?}: {}", path, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let source = Self::from_reader(file)?;

        info!(path = ?path, frames = source.total_frames, "Recording loaded");

        Ok(source)
    }

    /// Parse a recording from any reader.
    ///
    /// Structural problems (unreadable rows, unknown hand labels, landmark
    /// indices out of range) fail the whole load. Hands with an incomplete
    /// landmark set are skipped with a warning, leaving the rest of the
    /// recording intact.
    #[track_caller]
    pub fn from_reader<R: io::Read>(reader: R) -> AppResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut pending: BTreeMap<u64, PendingFrame> = BTreeMap::new();

        for result in csv_reader.deserialize::<RecordRow>() {
            let row = result.map_err(|e| AppError::RecordingError {
                reason: format!("Malformed recording row: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let side: HandSide = row.hand.parse().map_err(|e| AppError::RecordingError {
                reason: format!("Row for frame {}: {}", row.frame, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            if row.landmark >= LANDMARK_COUNT {
                return Err(AppError::RecordingError {
                    reason: format!(
                        "Row for frame {}: landmark index {} out of range",
                        row.frame, row.landmark
                    ),
                    location: ErrorLocation::from(Location::caller()),
                });
            }

            pending
                .entry(row.frame)
                .or_default()
                .hand_mut(side)
                .insert(row.landmark, Landmark::new(row.x, row.y, row.z));
        }

        let mut frames = VecDeque::new();

        if let (Some(&first), Some(&last)) =
            (pending.keys().next(), pending.keys().next_back())
        {
            for frame in first..=last {
                let hands = pending
                    .remove(&frame)
                    .map_or_else(Vec::new, |entry| entry.finish(frame));
                frames.push_back(hands);
            }
        }

        let total_frames = frames.len();

        Ok(Self {
            frames,
            total_frames,
        })
    }

    /// Number of frames the recording contained when loaded.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }
}

impl FrameSource for RecordedFrames {
    fn next_frame(&mut self) -> Option<Vec<HandObservation>> {
        self.frames.pop_front()
    }
}
