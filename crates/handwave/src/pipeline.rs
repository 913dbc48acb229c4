//! The blocking frame loop.
//!
//! Pulls frames from a `FrameSource`, runs them through the gesture
//! engine, and hands the results to the async side: action requests over
//! a bounded mpsc channel, the latest engine snapshot and frame rate over
//! a watch channel.

use crate::{AppError, AppResult, FpsCounter, FrameSource};

use std::{
    panic::Location,
    thread,
    time::{Duration, Instant},
};

use error_location::ErrorLocation;
use handwave_core::{ActionRequest, EngineSnapshot, GestureEngine};
use tokio::sync::{mpsc, watch};
use tracing::info;

/// Latest pipeline state, published after every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineStatus {
    /// Engine snapshot taken after the frame was processed.
    pub snapshot: EngineSnapshot,
    /// Frame rate measured between loop iterations.
    pub fps: f64,
}

/// Totals reported when the frame loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Frames pulled from the source.
    pub frames: u64,
    /// Action requests delivered to the executor.
    pub actions: u64,
}

/// The frame loop. Runs on a blocking worker thread.
///
/// Exits when the source is exhausted, when the shutdown flag is set, or
/// when the action channel closes underneath it.
pub struct Pipeline {
    pub(crate) engine: GestureEngine,
    pub(crate) source: Box<dyn FrameSource + Send>,
    pub(crate) frame_interval: Duration,
    pub(crate) action_tx: mpsc::Sender<ActionRequest>,
    pub(crate) status_tx: watch::Sender<PipelineStatus>,
    pub(crate) shutdown_rx: watch::Receiver<bool>,
}

impl Pipeline {
    /// Run the loop to completion.
    pub fn run(mut self) -> AppResult<PipelineStats> {
        let mut stats = PipelineStats::default();
        let mut fps = FpsCounter::new();

        info!(
            frame_interval_us = self.frame_interval.as_micros(),
            "Pipeline started"
        );

        while !*self.shutdown_rx.borrow() {
            let frame_started = Instant::now();

            let Some(hands) = self.source.next_frame() else {
                info!(frames = stats.frames, "Frame source exhausted");
                break;
            };

            let requests = self.engine.process_frame(&hands);
            stats.frames += 1;

            for request in requests {
                self.action_tx
                    .blocking_send(request)
                    .map_err(|e| AppError::ChannelSendFailed {
                        message: format!("Action channel closed: {}", e),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                stats.actions += 1;
            }

            // Latest-value publication; a slow consumer only ever sees the
            // newest status and never stalls the loop.
            let _ = self.status_tx.send(PipelineStatus {
                snapshot: self.engine.snapshot(),
                fps: fps.update(),
            });

            if let Some(remaining) = self.frame_interval.checked_sub(frame_started.elapsed()) {
                thread::sleep(remaining);
            }
        }

        info!(
            frames = stats.frames,
            actions = stats.actions,
            "Pipeline stopped"
        );

        Ok(stats)
    }
}
