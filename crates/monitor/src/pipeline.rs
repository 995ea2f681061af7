//! Per-frame analysis pipeline

use std::sync::Arc;

use alerting::{evaluate, AlertDispatcher, AlertKind, NotificationSink};
use drowsiness::DrowsinessAnalyzer;
use face_mesh::LandmarkExtractor;
use frame_source::VideoFrame;
use head_pose::{HeadPoseAnalyzer, PoseReading};
use object_watch::{Detection, ObjectDetector, PresenceTracker};
use serde::Serialize;
use tracing::warn;

use crate::config::MonitorConfig;

/// Everything one frame produced, for rendering and for test harnesses.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    /// Zero-based index of the processed frame
    pub frame_index: u64,
    /// Average eye aspect ratio this frame
    pub ear: f32,
    /// Debounced drowsy state
    pub is_drowsy: bool,
    /// Debounced distracted state
    pub is_distracted: bool,
    /// Smoothed head pose
    pub pose: PoseReading,
    /// Persisted object detections (last refreshed batch)
    pub detections: Vec<Detection>,
    /// Alerts active this frame
    pub alerts: Vec<AlertKind>,
    /// Subset of alerts whose notification actually fired (cooldown passed)
    pub alerts_fired: Vec<AlertKind>,
}

/// The frame-synchronous behavior monitor.
///
/// Owns all analyzer state exclusively; one full iteration of the
/// analysis cycle (landmarks, eye, pose, decimated object detection,
/// fusion, dispatch) is a single synchronous [`Monitor::process_frame`]
/// call, so the pipeline can be driven by a live camera or by recorded
/// frame sequences in tests.
pub struct Monitor {
    config: MonitorConfig,
    extractor: Box<dyn LandmarkExtractor>,
    detector: Box<dyn ObjectDetector>,
    drowsiness: DrowsinessAnalyzer,
    head_pose: HeadPoseAnalyzer,
    tracker: PresenceTracker,
    dispatcher: AlertDispatcher,
    frame_index: u64,
}

impl Monitor {
    /// Assemble the pipeline from its external collaborators.
    pub fn new(
        config: MonitorConfig,
        extractor: Box<dyn LandmarkExtractor>,
        detector: Box<dyn ObjectDetector>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            drowsiness: DrowsinessAnalyzer::new(&config.drowsiness),
            head_pose: HeadPoseAnalyzer::new(&config.distraction),
            tracker: PresenceTracker::new(),
            dispatcher: AlertDispatcher::new(&config.alerts, sink),
            extractor,
            detector,
            config,
            frame_index: 0,
        }
    }

    /// Run one full analysis cycle on a frame.
    ///
    /// Face analysis runs every call; object detection only when the frame
    /// index hits the configured interval (including frame 0), with the
    /// previous batch persisting in between. Raw detector outputs pass the
    /// configured confidence filter and class table before they replace
    /// the batch. An inference failure mid-run keeps the previous batch
    /// and is treated like a skipped frame.
    pub fn process_frame(&mut self, frame: &VideoFrame) -> FrameReport {
        let frame_index = self.frame_index;
        self.frame_index += 1;

        let landmarks = self.extractor.extract(frame);

        let eye = self
            .drowsiness
            .analyze(landmarks.as_ref(), frame.width, frame.height);
        let pose = self
            .head_pose
            .analyze(landmarks.as_ref(), frame.width, frame.height);

        // An interval of 0 would divide by zero; treat it as every frame
        let interval = u64::from(self.config.detection.interval_frames).max(1);
        if frame_index % interval == 0 {
            match self.detector.detect(frame) {
                Ok(raw) => {
                    let detection = &self.config.detection;
                    let batch: Vec<Detection> = raw
                        .iter()
                        .filter(|d| d.confidence >= detection.confidence_threshold)
                        .filter_map(|d| detection.classes.resolve(d))
                        .collect();
                    self.tracker.refresh(batch);
                }
                Err(e) => {
                    warn!(error = %e, "object detection failed, keeping previous batch");
                    self.tracker.tick();
                }
            }
        } else {
            self.tracker.tick();
        }

        let alerts = evaluate(eye.is_drowsy, pose.is_distracted, self.tracker.current());
        let alerts_fired: Vec<AlertKind> = alerts
            .iter()
            .copied()
            .filter(|&kind| self.dispatcher.dispatch(kind))
            .collect();

        FrameReport {
            frame_index,
            ear: eye.ear,
            is_drowsy: eye.is_drowsy,
            is_distracted: pose.is_distracted,
            pose,
            detections: self.tracker.current().to_vec(),
            alerts,
            alerts_fired,
        }
    }

    /// Configuration snapshot the pipeline was built with
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
