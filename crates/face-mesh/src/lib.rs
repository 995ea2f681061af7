//! Facial Landmark Model
//!
//! Holds the per-frame normalized landmark collection produced by the
//! external face-mesh model, the canonical anatomical indices the analyzers
//! read from it, and the 2D geometry helpers shared by eye and pose
//! analysis. The landmark model itself (inference, tracking) stays behind
//! [`LandmarkExtractor`].

pub mod geometry;
pub mod indices;
mod landmarks;

pub use geometry::Point2;
pub use landmarks::{FaceLandmarks, LandmarkError};

use frame_source::VideoFrame;

/// Boundary to the external face-landmark model.
///
/// Returns at most one face per frame; `None` means no face was found and
/// is a neutral per-frame signal for every downstream analyzer, never an
/// error.
pub trait LandmarkExtractor {
    /// Extract normalized landmarks for the most prominent face, if any.
    fn extract(&mut self, frame: &VideoFrame) -> Option<FaceLandmarks>;
}
