//! Canonical MediaPipe face-mesh landmark indices
//!
//! Index order inside each eye array is the standard 6-point EAR layout:
//! [left corner, upper-lid 1, upper-lid 2, right corner, lower-lid 2,
//! lower-lid 1], i.e. p1..p6 of the EAR formula.

/// Left eye, 6-point definition
pub const LEFT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Right eye, 6-point definition
pub const RIGHT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Pose reference points: nose tip, chin, left eye outer corner,
/// right eye outer corner, left mouth corner, right mouth corner.
pub const POSE_ANCHORS: [usize; 6] = [1, 152, 33, 263, 61, 291];

/// Minimum landmark count a full face mesh carries
pub const MESH_SIZE: usize = 468;
