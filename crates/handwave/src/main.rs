//! Handwave: Webcam gesture control for media keys and application launches.

mod action_executor;
mod app;
mod config;
mod error;
mod fps;
mod frame_source;
mod pipeline;

pub(crate) use {
    action_executor::ActionExecutor,
    app::App,
    error::{AppError, Result as AppResult},
    fps::FpsCounter,
    frame_source::{FrameSource, RecordedFrames},
    pipeline::{Pipeline, PipelineStats, PipelineStatus},
};

use crate::config::Config;

use std::path::PathBuf;

use handwave_core::GestureEngine;
use tokio::sync::{mpsc, watch};
use tracing::error;

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("handwave=debug,handwave_core=debug")
        .init();

    let Some(recording_path) = std::env::args().nth(1).map(PathBuf::from) else {
        error!("Usage: handwave <recording.csv>");
        std::process::exit(2);
    };

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };

    let engine_config = match config.activation.to_engine_config() {
        Ok(ec) => ec,
        Err(e) => {
            error!("Invalid [activation] settings: {:?}", e);
            std::process::exit(1);
        }
    };

    let action_map = match config.actions.to_action_map() {
        Ok(map) => map,
        Err(e) => {
            error!("Invalid [actions] settings: {:?}", e);
            std::process::exit(1);
        }
    };

    let frame_interval = match config.replay.frame_interval() {
        Ok(interval) => interval,
        Err(e) => {
            error!("Invalid [replay] settings: {:?}", e);
            std::process::exit(1);
        }
    };

    let engine = match GestureEngine::new(engine_config, action_map) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to create gesture engine: {:?}", e);
            std::process::exit(1);
        }
    };

    let source = match RecordedFrames::open(&recording_path) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to load recording: {:?}", e);
            std::process::exit(1);
        }
    };

    let executor = ActionExecutor::new(config.apps);

    let (action_tx, action_rx) = mpsc::channel(32);
    let (status_tx, status_rx) = watch::channel(PipelineStatus::default());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let pipeline = Pipeline {
        engine,
        source: Box::new(source),
        frame_interval,
        action_tx,
        status_tx,
        shutdown_rx,
    };

    let app = App {
        executor,
        pipeline,
        action_rx,
        status_rx,
        shutdown_tx,
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to create tokio runtime: {:?}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        if let Err(e) = app.run().await {
            error!(error = ?e, "App error");
            std::process::exit(1);
        }
    });
}
