use crate::{ActionExecutor, AppResult, Pipeline, PipelineStats, PipelineStatus};

use std::time::Duration;

use handwave_core::ActionRequest;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// How often the supervisor logs channel state and frame rate.
const STATUS_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// How long to wait for the frame loop to observe the shutdown flag.
const PIPELINE_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Main application state.
///
/// Runs on the async runtime thread. The frame loop runs on a blocking
/// worker via `spawn_blocking` because the source reads and pacing sleeps
/// are synchronous; everything crosses back over channels.
pub struct App {
    pub(crate) executor: ActionExecutor,
    pub(crate) pipeline: Pipeline,
    pub(crate) action_rx: mpsc::Receiver<ActionRequest>,
    pub(crate) status_rx: watch::Receiver<PipelineStatus>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        let Self {
            executor,
            pipeline,
            mut action_rx,
            status_rx,
            shutdown_tx,
        } = self;

        let session_id = Uuid::new_v4();
        info!(session_id = %session_id, "Handwave starting");

        let pipeline_handle: JoinHandle<AppResult<PipelineStats>> =
            tokio::task::spawn_blocking(move || pipeline.run());

        let mut status_interval = tokio::time::interval(STATUS_LOG_INTERVAL);

        loop {
            tokio::select! {
                maybe_request = action_rx.recv() => {
                    match maybe_request {
                        Some(request) => {
                            if let Err(e) = executor.execute(&request).await {
                                error!(
                                    error = ?e,
                                    action = %request.action,
                                    "Failed to execute action"
                                );
                            }
                        }
                        None => {
                            info!("Frame source finished");
                            break;
                        }
                    }
                }

                _ = status_interval.tick() => {
                    let status = *status_rx.borrow();
                    debug!(
                        left = %status.snapshot.left.state,
                        right = %status.snapshot.right.state,
                        fps = status.fps,
                        "Pipeline status"
                    );
                }

                result = tokio::signal::ctrl_c() => {
                    if let Err(e) = result {
                        error!(error = ?e, "Ctrl-C listener failed");
                    }
                    info!("Shutdown requested");
                    break;
                }
            }
        }

        let _ = shutdown_tx.send(true);

        match tokio::time::timeout(PIPELINE_JOIN_TIMEOUT, pipeline_handle).await {
            Ok(Ok(Ok(stats))) => info!(
                frames = stats.frames,
                actions = stats.actions,
                "Pipeline stopped cleanly"
            ),
            Ok(Ok(Err(e))) => error!(error = ?e, "Pipeline exited with error"),
            Ok(Err(e)) => error!(error = ?e, "Pipeline task panicked"),
            Err(_) => info!(
                "Pipeline did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        info!(session_id = %session_id, "Handwave shut down successfully");

        Ok(())
    }
}
