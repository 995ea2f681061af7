//! Behavior Monitor - Main Entry Point
//!
//! Wires the pipeline to its collaborator boundaries. This build ships
//! without bundled capture or model backends: it runs a headless smoke
//! pass over a synthetic frame feed with no face-landmark model and no
//! object-detection model attached. Real backends plug in through the
//! `FrameSource`, `LandmarkExtractor`, and `ObjectDetector` traits.

use std::sync::Arc;

use alerting::AudioSink;
use face_mesh::{FaceLandmarks, LandmarkExtractor};
use frame_source::{SyntheticSource, VideoFrame};
use monitor::{init_logging, LogOverlay, Monitor, MonitorConfig};
use object_watch::NullDetector;
use tokio::sync::watch;
use tracing::{info, warn};

/// Placeholder landmark boundary for running without a face-mesh model.
struct NoFaceExtractor;

impl LandmarkExtractor for NoFaceExtractor {
    fn extract(&mut self, _frame: &VideoFrame) -> Option<FaceLandmarks> {
        None
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Behavior Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = MonitorConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        MonitorConfig::default()
    });

    let (width, height, fps) = (
        config.camera.width,
        config.camera.height,
        config.camera.fps,
    );

    let mut monitor = Monitor::new(
        config,
        Box::new(NoFaceExtractor),
        Box::new(NullDetector::new()),
        Arc::new(AudioSink::platform_default()),
    );

    // Ctrl-C flips the cooperative shutdown flag checked once per frame
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    // Ten seconds of synthetic frames at the configured rate
    let mut source = SyntheticSource::new(width, height, fps * 10);
    let mut overlay = LogOverlay;

    match monitor::run(&mut monitor, &mut source, &mut overlay, shutdown_rx).await {
        Ok(()) => info!("monitor stopped"),
        Err(e) => warn!(error = %e, "frame source terminated"),
    }

    Ok(())
}
