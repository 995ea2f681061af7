//! Overlay hand-off boundary

use frame_source::VideoFrame;
use tracing::{debug, trace};

use crate::pipeline::FrameReport;

/// Consumes the current frame plus its analysis for display. Rendering
/// itself (boxes, banners, status text) is external to the core.
pub trait OverlaySink {
    fn render(&mut self, frame: &VideoFrame, report: &FrameReport, fps: f32);
}

/// Headless overlay: logs the per-frame status lines a display would show.
pub struct LogOverlay;

impl OverlaySink for LogOverlay {
    fn render(&mut self, _frame: &VideoFrame, report: &FrameReport, fps: f32) {
        debug!(
            frame = report.frame_index,
            status = if report.is_drowsy { "DROWSY" } else { "Awake" },
            ear = %format!("{:.2}", report.ear),
            focus = if report.is_distracted { "DISTRACTED" } else { "Good" },
            objects = report.detections.len(),
            fps = fps as u32,
            "frame"
        );
        for alert in &report.alerts {
            if let Some(banner) = alert.banner() {
                debug!(banner, "alert banner");
            }
        }
        if let Ok(json) = serde_json::to_string(report) {
            trace!(report = %json, "frame report");
        }
    }
}

/// Overlay sink that discards everything, for tests and benchmarks.
pub struct NullOverlay;

impl OverlaySink for NullOverlay {
    fn render(&mut self, _frame: &VideoFrame, _report: &FrameReport, _fps: f32) {}
}
