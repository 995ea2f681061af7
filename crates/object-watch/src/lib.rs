//! Hazardous Object Presence
//!
//! Object detection is far slower than one frame period, so the pipeline
//! runs it on a decimated schedule and this crate keeps the last batch of
//! detections alive across the skipped frames. Inference itself (YOLO or
//! similar) lives behind [`ObjectDetector`] and emits raw model outputs;
//! the pipeline applies the configured confidence filter and [`ClassMap`]
//! before a batch reaches the tracker.

mod detection;
mod tracker;

pub use detection::{BoundingBox, ClassMap, Detection, ObjectLabel, RawDetection};
pub use tracker::PresenceTracker;

use frame_source::VideoFrame;
use thiserror::Error;
use tracing::warn;

/// Object detection error types
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Boundary to the external object detector.
pub trait ObjectDetector {
    /// Run inference on one frame, returning every raw model output.
    /// Confidence filtering and class labeling happen in the caller.
    fn detect(&mut self, frame: &VideoFrame) -> Result<Vec<RawDetection>, DetectError>;
}

/// Degraded-mode detector used when the real model fails to load: always
/// returns an empty batch and never fails, so the monitoring loop keeps
/// running with face analysis only.
pub struct NullDetector;

impl NullDetector {
    pub fn new() -> Self {
        warn!("object detector unavailable, degrading to empty detections");
        Self
    }
}

impl Default for NullDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectDetector for NullDetector {
    fn detect(&mut self, _frame: &VideoFrame) -> Result<Vec<RawDetection>, DetectError> {
        Ok(Vec::new())
    }
}
