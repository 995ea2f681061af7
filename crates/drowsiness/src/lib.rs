//! Eye-Closure Analyzer
//!
//! Converts the eye landmarks of a face mesh into an Eye Aspect Ratio
//! score and a debounced drowsy/awake state. EAR drops sharply when the
//! eyelids close; a latch requires the low-EAR condition to persist for a
//! configured number of consecutive frames before alarming, then holds the
//! alarm until the eyes reopen.

mod ear;

pub use ear::calculate_ear;

use debounce::Latch;
use face_mesh::indices::{LEFT_EYE, RIGHT_EYE};
use face_mesh::FaceLandmarks;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Eye-closure analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrowsinessConfig {
    /// EAR below this value counts as eyes closed
    pub ear_threshold: f32,
    /// Consecutive closed frames before the drowsy alarm latches
    pub consec_frames: u32,
}

impl Default for DrowsinessConfig {
    fn default() -> Self {
        Self {
            ear_threshold: 0.25,
            consec_frames: 15,
        }
    }
}

/// One frame's eye-closure reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeReading {
    /// Debounced drowsy state
    pub is_drowsy: bool,
    /// Average EAR of both eyes (0.0 on no-face frames)
    pub ear: f32,
}

impl EyeReading {
    /// Neutral reading for frames without a face
    pub fn neutral() -> Self {
        Self {
            is_drowsy: false,
            ear: 0.0,
        }
    }
}

/// Per-session eye-closure analyzer. Owns its latch state exclusively;
/// one instance per monitored driver.
pub struct DrowsinessAnalyzer {
    config: DrowsinessConfig,
    latch: Latch,
}

impl DrowsinessAnalyzer {
    /// Create an analyzer from an immutable config snapshot.
    pub fn new(config: &DrowsinessConfig) -> Self {
        Self {
            latch: Latch::new(config.consec_frames),
            config: config.clone(),
        }
    }

    /// Analyze one frame.
    ///
    /// A no-face frame is fully neutral: the consecutive-frame counter AND
    /// any latched alarm are cleared, matching the pose analyzer's
    /// behavior.
    pub fn analyze(
        &mut self,
        landmarks: Option<&FaceLandmarks>,
        frame_w: u32,
        frame_h: u32,
    ) -> EyeReading {
        let Some(landmarks) = landmarks else {
            self.latch.reset();
            return EyeReading::neutral();
        };

        let left = landmarks.points_px(&LEFT_EYE, frame_w, frame_h);
        let right = landmarks.points_px(&RIGHT_EYE, frame_w, frame_h);

        let left_ear = calculate_ear(&left);
        let right_ear = calculate_ear(&right);
        let ear = (left_ear + right_ear) / 2.0;

        let is_drowsy = self.latch.observe(ear < self.config.ear_threshold);
        if is_drowsy {
            debug!(
                ear = f64::from(ear),
                closed_frames = self.latch.count(),
                "drowsy alarm active"
            );
        }

        EyeReading { is_drowsy, ear }
    }

    /// Consecutive closed-eye frames counted so far
    pub fn closed_frames(&self) -> u32 {
        self.latch.count()
    }
}
