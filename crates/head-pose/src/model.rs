//! Generic 3D face model and pinhole camera approximation

use nalgebra::Vector3;

/// Generic 3D face model coordinates in millimeters, matching the order of
/// [`face_mesh::indices::POSE_ANCHORS`]: nose tip, chin, left eye outer
/// corner, right eye outer corner, left mouth corner, right mouth corner.
///
/// These are fixed anthropometric constants, not derived from the current
/// face.
pub const MODEL_POINTS: [[f64; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [0.0, -330.0, -65.0],
    [-225.0, 170.0, -135.0],
    [225.0, 170.0, -135.0],
    [-150.0, -150.0, -125.0],
    [150.0, -150.0, -125.0],
];

/// Model points as nalgebra vectors
pub fn model_points() -> [Vector3<f64>; 6] {
    MODEL_POINTS.map(Vector3::from)
}

/// Pinhole camera approximation: focal length equals the frame width,
/// principal point at the frame center, zero lens distortion.
#[derive(Debug, Clone, Copy)]
pub struct CameraIntrinsics {
    pub focal: f64,
    pub cx: f64,
    pub cy: f64,
}

impl CameraIntrinsics {
    /// Approximate intrinsics for a frame of the given size.
    pub fn from_frame(width: u32, height: u32) -> Self {
        Self {
            focal: width as f64,
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
        }
    }

    /// Project a camera-space point to pixel coordinates.
    ///
    /// Depth is clamped away from zero so intermediate solver states
    /// behind the camera produce large finite residuals instead of NaN.
    pub fn project(&self, p: &Vector3<f64>) -> (f64, f64) {
        let z = p.z.max(1e-6);
        (
            self.focal * p.x / z + self.cx,
            self.focal * p.y / z + self.cy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsics_from_frame() {
        let cam = CameraIntrinsics::from_frame(1280, 720);
        assert_eq!(cam.focal, 1280.0);
        assert_eq!(cam.cx, 640.0);
        assert_eq!(cam.cy, 360.0);
    }

    #[test]
    fn test_projection_of_centered_point() {
        let cam = CameraIntrinsics::from_frame(640, 480);
        let (u, v) = cam.project(&Vector3::new(0.0, 0.0, 1000.0));
        assert_eq!(u, 320.0);
        assert_eq!(v, 240.0);
    }

    #[test]
    fn test_model_is_symmetric() {
        let pts = model_points();
        // Eye corners and mouth corners mirror across the nose axis
        assert_eq!(pts[2].x, -pts[3].x);
        assert_eq!(pts[4].x, -pts[5].x);
        assert_eq!(pts[2].y, pts[3].y);
    }
}
