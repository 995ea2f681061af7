//! Rotation matrix to Euler angles

use nalgebra::Rotation3;

/// Euler angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerDegrees {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Decompose a rotation into pitch/yaw/roll degrees, ZYX convention:
/// R = Rz(roll) * Ry(yaw) * Rx(pitch).
///
/// In the y-down camera convention an upright frontal face decomposes to a
/// raw pitch near 180 degrees; [`normalize_pitch`] folds that axis-flip
/// artifact back to zero.
pub fn decompose(rotation: &Rotation3<f64>) -> EulerDegrees {
    let r = rotation.matrix();

    // Guard the asin argument against rounding drift past +-1
    let sin_yaw = (-r[(2, 0)]).clamp(-1.0, 1.0);
    let yaw = sin_yaw.asin();
    let pitch = r[(2, 1)].atan2(r[(2, 2)]);
    let roll = r[(1, 0)].atan2(r[(0, 0)]);

    EulerDegrees {
        pitch: pitch.to_degrees() as f32,
        yaw: yaw.to_degrees() as f32,
        roll: roll.to_degrees() as f32,
    }
}

/// Fold axis-flip pitch readings back toward zero.
///
/// Raw pitch magnitudes beyond 100 degrees indicate the decomposition
/// landed on the flipped branch; shift by 180 degrees to recover the
/// physically meaningful angle.
pub fn normalize_pitch(pitch: f32) -> f32 {
    if pitch > 100.0 {
        pitch - 180.0
    } else if pitch < -100.0 {
        pitch + 180.0
    } else {
        pitch
    }
}
