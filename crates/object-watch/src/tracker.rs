//! Decimated-schedule presence tracker

use tracing::debug;

use crate::Detection;

/// Keeps the most recent detection batch alive across frames where
/// inference was skipped.
///
/// Holds exactly one batch: a refresh discards the previous batch
/// wholesale, with no merging and no tracking of object identity across
/// batches.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    last_detections: Vec<Detection>,
    frames_since_refresh: u32,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite memory with a fresh detection batch.
    pub fn refresh(&mut self, detections: Vec<Detection>) {
        debug!(count = detections.len(), "object detections refreshed");
        self.last_detections = detections;
        self.frames_since_refresh = 0;
    }

    /// Record a frame on which inference was skipped.
    pub fn tick(&mut self) {
        self.frames_since_refresh += 1;
    }

    /// The last refreshed batch, unconditionally.
    pub fn current(&self) -> &[Detection] {
        &self.last_detections
    }

    /// Frames elapsed since the last refresh
    pub fn frames_since_refresh(&self) -> u32 {
        self.frames_since_refresh
    }
}
