//! Head-Pose Analyzer
//!
//! Recovers pitch/yaw/roll from the face mesh by solving a
//! perspective-n-point problem against a generic 3D face model, smooths
//! the angles over a short sliding window, and debounces a
//! distracted/focused state from the smoothed magnitudes.
//!
//! Convention: angles are ZYX Euler degrees in the y-down camera frame,
//! pitch folded off the flipped branch (see [`euler::normalize_pitch`]).
//! Distraction thresholds apply to the window means, not instantaneous
//! readings, at unit scale.

pub mod euler;
pub mod model;
pub mod pnp;

pub use euler::{normalize_pitch, EulerDegrees};
pub use pnp::PnpSolution;

use debounce::{Latch, SlidingWindow};
use face_mesh::indices::POSE_ANCHORS;
use face_mesh::FaceLandmarks;
use model::{model_points, CameraIntrinsics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Head-pose analyzer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistractionConfig {
    /// Smoothed |pitch| above this many degrees counts as off-pose
    pub pitch_threshold: f32,
    /// Smoothed |yaw| above this many degrees counts as off-pose
    pub yaw_threshold: f32,
    /// Consecutive off-pose frames before the distraction alarm latches
    pub consec_frames: u32,
    /// Sliding-window capacity for angle smoothing
    pub smoothing_window: usize,
}

impl Default for DistractionConfig {
    fn default() -> Self {
        Self {
            pitch_threshold: 25.0,
            yaw_threshold: 30.0,
            consec_frames: 10,
            smoothing_window: 5,
        }
    }
}

/// One frame's head-pose reading. Angles are the smoothed window means.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseReading {
    /// Debounced distracted state
    pub is_distracted: bool,
    /// Smoothed pitch in degrees
    pub pitch: f32,
    /// Smoothed yaw in degrees
    pub yaw: f32,
    /// Smoothed roll in degrees
    pub roll: f32,
}

impl PoseReading {
    /// Neutral reading for frames without a usable pose
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Per-session head-pose analyzer. Owns its windows and latch exclusively.
pub struct HeadPoseAnalyzer {
    config: DistractionConfig,
    pitch_window: SlidingWindow,
    yaw_window: SlidingWindow,
    roll_window: SlidingWindow,
    latch: Latch,
}

impl HeadPoseAnalyzer {
    /// Create an analyzer from an immutable config snapshot.
    pub fn new(config: &DistractionConfig) -> Self {
        Self {
            pitch_window: SlidingWindow::new(config.smoothing_window),
            yaw_window: SlidingWindow::new(config.smoothing_window),
            roll_window: SlidingWindow::new(config.smoothing_window),
            latch: Latch::new(config.consec_frames),
            config: config.clone(),
        }
    }

    /// Analyze one frame.
    ///
    /// No face: windows cleared, latch reset, neutral reading. Solver
    /// non-convergence: no reliable pose this frame, so the latch resets,
    /// but the windows keep their recent history.
    pub fn analyze(
        &mut self,
        landmarks: Option<&FaceLandmarks>,
        frame_w: u32,
        frame_h: u32,
    ) -> PoseReading {
        let Some(landmarks) = landmarks else {
            self.pitch_window.clear();
            self.yaw_window.clear();
            self.roll_window.clear();
            self.latch.reset();
            return PoseReading::neutral();
        };

        let image: Vec<(f64, f64)> = landmarks
            .points_px(&POSE_ANCHORS, frame_w, frame_h)
            .iter()
            .map(|p| (p.x as f64, p.y as f64))
            .collect();

        let camera = CameraIntrinsics::from_frame(frame_w, frame_h);
        let Some(solution) = pnp::solve(&camera, &model_points(), &image) else {
            debug!("pose solver did not converge, treating frame as no-signal");
            self.latch.reset();
            return PoseReading::neutral();
        };

        let raw = euler::decompose(&solution.rotation);
        self.pitch_window.push(normalize_pitch(raw.pitch));
        self.yaw_window.push(raw.yaw);
        self.roll_window.push(raw.roll);

        let pitch = self.pitch_window.mean();
        let yaw = self.yaw_window.mean();
        let roll = self.roll_window.mean();

        let off_pose =
            pitch.abs() > self.config.pitch_threshold || yaw.abs() > self.config.yaw_threshold;
        let is_distracted = self.latch.observe(off_pose);
        if is_distracted {
            debug!(
                pitch = f64::from(pitch),
                yaw = f64::from(yaw),
                "distraction alarm active"
            );
        }

        PoseReading {
            is_distracted,
            pitch,
            yaw,
            roll,
        }
    }

    /// Consecutive off-pose frames counted so far
    pub fn offpose_frames(&self) -> u32 {
        self.latch.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_mesh::indices::MESH_SIZE;
    use face_mesh::Point2;
    use nalgebra::{Rotation3, Vector3};

    const W: u32 = 1280;
    const H: u32 = 720;

    /// Build a full mesh whose pose anchors are the projections of the
    /// model points under the given head rotation (composed with the
    /// frontal flip) at one meter from the camera.
    fn mesh_with_rotation(yaw_deg: f64, pitch_deg: f64) -> FaceLandmarks {
        let camera = CameraIntrinsics::from_frame(W, H);
        let rotation = Rotation3::new(Vector3::new(std::f64::consts::PI, 0.0, 0.0))
            * Rotation3::new(Vector3::new(pitch_deg.to_radians(), 0.0, 0.0))
            * Rotation3::new(Vector3::new(0.0, yaw_deg.to_radians(), 0.0));
        let translation = Vector3::new(0.0, 0.0, 1000.0);

        let mut points = vec![Point2::new(0.5, 0.5); MESH_SIZE];
        for (anchor, model) in POSE_ANCHORS.iter().zip(model_points().iter()) {
            let (u, v) = camera.project(&(rotation * model + translation));
            points[*anchor] = Point2::new(u as f32 / W as f32, v as f32 / H as f32);
        }
        FaceLandmarks::new(points).unwrap()
    }

    fn config(consec: u32) -> DistractionConfig {
        DistractionConfig {
            consec_frames: consec,
            ..Default::default()
        }
    }

    #[test]
    fn test_frontal_face_is_focused() {
        let mut analyzer = HeadPoseAnalyzer::new(&config(3));
        let mesh = mesh_with_rotation(0.0, 0.0);
        let reading = analyzer.analyze(Some(&mesh), W, H);
        assert!(!reading.is_distracted);
        assert!(reading.pitch.abs() < 2.0);
        assert!(reading.yaw.abs() < 2.0);
    }

    #[test]
    fn test_turned_head_alarms_after_consec_frames() {
        let mut analyzer = HeadPoseAnalyzer::new(&config(3));
        let turned = mesh_with_rotation(40.0, 0.0);

        assert!(!analyzer.analyze(Some(&turned), W, H).is_distracted);
        assert!(!analyzer.analyze(Some(&turned), W, H).is_distracted);
        let reading = analyzer.analyze(Some(&turned), W, H);
        assert!(reading.is_distracted);
        assert!(reading.yaw.abs() > 30.0);
    }

    #[test]
    fn test_return_to_center_clears_alarm() {
        let mut analyzer = HeadPoseAnalyzer::new(&config(2));
        let turned = mesh_with_rotation(40.0, 0.0);
        analyzer.analyze(Some(&turned), W, H);
        assert!(analyzer.analyze(Some(&turned), W, H).is_distracted);

        // The smoothing window needs a few centered frames before the
        // mean drops back under threshold
        let centered = mesh_with_rotation(0.0, 0.0);
        let mut cleared = false;
        for _ in 0..5 {
            if !analyzer.analyze(Some(&centered), W, H).is_distracted {
                cleared = true;
            }
        }
        assert!(cleared);
    }

    #[test]
    fn test_no_face_resets_state() {
        let mut analyzer = HeadPoseAnalyzer::new(&config(2));
        let turned = mesh_with_rotation(40.0, 0.0);
        analyzer.analyze(Some(&turned), W, H);
        assert!(analyzer.offpose_frames() > 0);

        let reading = analyzer.analyze(None, W, H);
        assert_eq!(reading, PoseReading::neutral());
        assert_eq!(analyzer.offpose_frames(), 0);
        assert!(analyzer.pitch_window.is_empty());
    }

    #[test]
    fn test_degenerate_landmarks_are_no_signal() {
        let mut analyzer = HeadPoseAnalyzer::new(&config(2));
        // Every anchor at the frame center: the solver cannot converge
        let mesh = FaceLandmarks::new(vec![Point2::new(0.5, 0.5); MESH_SIZE]).unwrap();
        let reading = analyzer.analyze(Some(&mesh), W, H);
        assert_eq!(reading, PoseReading::neutral());
        assert_eq!(analyzer.offpose_frames(), 0);
    }
}
