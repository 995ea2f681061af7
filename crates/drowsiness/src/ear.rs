//! Eye Aspect Ratio

use face_mesh::geometry::safe_ratio;
use face_mesh::Point2;

/// Calculate the Eye Aspect Ratio for one eye.
///
/// `eye` holds the standard 6-point layout p1..p6:
/// p1/p4 horizontal corners, p2/p6 and p3/p5 the two vertical lid pairs.
///
/// EAR = (|p2-p6| + |p3-p5|) / (2 * |p1-p4|)
///
/// A degenerate eye with coincident corners yields 0.0 rather than a
/// division error.
pub fn calculate_ear(eye: &[Point2]) -> f32 {
    debug_assert_eq!(eye.len(), 6);

    let vertical_a = eye[1].distance(&eye[5]);
    let vertical_b = eye[2].distance(&eye[4]);
    let horizontal = eye[0].distance(&eye[3]);

    safe_ratio(vertical_a + vertical_b, 2.0 * horizontal)
}
