//! Iterative perspective-n-point solver
//!
//! Recovers the head rotation from the 6 fixed 3D model points and their
//! observed 2D projections, by Levenberg-Marquardt refinement of an
//! axis-angle rotation plus translation. The solver is seeded with an
//! upright frontal face about a meter from the lens, the expected geometry
//! of a cabin-mounted camera; realistic head poses are local refinements of
//! that seed.
//!
//! Non-convergence is an expected, recoverable outcome for degenerate or
//! near-planar point configurations and is reported as `None`.

use nalgebra::{DMatrix, DVector, Rotation3, Vector3, Vector6};
use tracing::trace;

use crate::model::CameraIntrinsics;

const MAX_ITERATIONS: usize = 100;
const STEP_TOLERANCE: f64 = 1e-10;
const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MAX: f64 = 1e10;
/// A converged solution must reproject this tightly on average, else the
/// point configuration did not constrain the pose.
const MAX_MEAN_REPROJ_PX: f64 = 25.0;

/// Recovered pose: rotation of the model into camera space plus the
/// camera-space translation of the model origin.
#[derive(Debug, Clone)]
pub struct PnpSolution {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
    /// Mean reprojection error in pixels
    pub reproj_error: f64,
}

/// Solve the PnP problem for matched 3D/2D correspondences.
///
/// Returns `None` when the solver fails to converge to a pose that
/// explains the observations.
pub fn solve(
    camera: &CameraIntrinsics,
    model: &[Vector3<f64>],
    image: &[(f64, f64)],
) -> Option<PnpSolution> {
    debug_assert_eq!(model.len(), image.len());

    // Seed: face upright and frontal (180 degrees about x in the y-down
    // camera convention), one meter out along the optical axis.
    let mut params = Vector6::new(std::f64::consts::PI, 0.0, 0.0, 0.0, 0.0, 1000.0);
    let mut lambda = LAMBDA_INIT;
    let mut residual = residuals(camera, model, image, &params);
    let mut cost = residual.norm_squared();

    for iter in 0..MAX_ITERATIONS {
        if cost < 1e-12 {
            break;
        }
        let jacobian = numeric_jacobian(camera, model, image, &params);
        let jt = jacobian.transpose();
        let jtj = &jt * &jacobian;
        let jtr = &jt * &residual;

        // Damped normal equations; raise lambda until a step reduces cost
        let step = loop {
            let mut damped = jtj.clone();
            for i in 0..6 {
                damped[(i, i)] += lambda * jtj[(i, i)].max(1e-12);
            }
            match damped.lu().solve(&jtr) {
                Some(delta) => {
                    let delta = Vector6::from_iterator(delta.iter().copied());
                    let candidate = params - delta;
                    let candidate_res = residuals(camera, model, image, &candidate);
                    let candidate_cost = candidate_res.norm_squared();
                    if candidate_cost.is_finite() && candidate_cost < cost {
                        lambda = (lambda / 10.0).max(1e-12);
                        break Some((delta, candidate, candidate_res, candidate_cost));
                    }
                    lambda *= 10.0;
                    if lambda > LAMBDA_MAX {
                        break None;
                    }
                }
                None => {
                    lambda *= 10.0;
                    if lambda > LAMBDA_MAX {
                        break None;
                    }
                }
            }
        };

        let Some((delta, next_params, next_residual, next_cost)) = step else {
            trace!(iter, "pnp solver stalled");
            return None;
        };

        params = next_params;
        residual = next_residual;
        cost = next_cost;

        if delta.norm() < STEP_TOLERANCE {
            break;
        }
    }

    if !cost.is_finite() {
        return None;
    }

    let rotation = Rotation3::new(Vector3::new(params[0], params[1], params[2]));
    let translation = Vector3::new(params[3], params[4], params[5]);

    // Cheirality: the face must sit in front of the camera
    for p in model {
        if (rotation * p + translation).z <= 0.0 {
            return None;
        }
    }

    let reproj_error = (cost / model.len() as f64).sqrt();
    if reproj_error > MAX_MEAN_REPROJ_PX {
        trace!(reproj_error, "pnp reprojection error too large");
        return None;
    }

    Some(PnpSolution {
        rotation,
        translation,
        reproj_error,
    })
}

/// Stacked reprojection residuals (2 per correspondence)
fn residuals(
    camera: &CameraIntrinsics,
    model: &[Vector3<f64>],
    image: &[(f64, f64)],
    params: &Vector6<f64>,
) -> DVector<f64> {
    let rotation = Rotation3::new(Vector3::new(params[0], params[1], params[2]));
    let translation = Vector3::new(params[3], params[4], params[5]);

    let mut res = DVector::zeros(model.len() * 2);
    for (i, (point, &(u_obs, v_obs))) in model.iter().zip(image.iter()).enumerate() {
        let (u, v) = camera.project(&(rotation * point + translation));
        res[2 * i] = u - u_obs;
        res[2 * i + 1] = v - v_obs;
    }
    res
}

/// Central-difference Jacobian of the residual vector
fn numeric_jacobian(
    camera: &CameraIntrinsics,
    model: &[Vector3<f64>],
    image: &[(f64, f64)],
    params: &Vector6<f64>,
) -> DMatrix<f64> {
    let rows = model.len() * 2;
    let mut jac = DMatrix::zeros(rows, 6);

    for col in 0..6 {
        let eps = 1e-6 * params[col].abs().max(1.0);
        let mut plus = *params;
        let mut minus = *params;
        plus[col] += eps;
        minus[col] -= eps;

        let r_plus = residuals(camera, model, image, &plus);
        let r_minus = residuals(camera, model, image, &minus);
        for row in 0..rows {
            jac[(row, col)] = (r_plus[row] - r_minus[row]) / (2.0 * eps);
        }
    }
    jac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::model_points;

    fn project_all(
        camera: &CameraIntrinsics,
        rotation: &Rotation3<f64>,
        translation: &Vector3<f64>,
    ) -> Vec<(f64, f64)> {
        model_points()
            .iter()
            .map(|p| camera.project(&(rotation * p + translation)))
            .collect()
    }

    #[test]
    fn test_recovers_frontal_pose() {
        let camera = CameraIntrinsics::from_frame(1280, 720);
        let truth_r = Rotation3::new(Vector3::new(std::f64::consts::PI, 0.0, 0.0));
        let truth_t = Vector3::new(12.0, -8.0, 1050.0);
        let image = project_all(&camera, &truth_r, &truth_t);

        let solution = solve(&camera, &model_points(), &image).expect("should converge");
        assert!(solution.reproj_error < 0.5);
        assert!((solution.translation - truth_t).norm() < 5.0);
        assert!(solution.rotation.angle_to(&truth_r).to_degrees() < 0.5);
    }

    #[test]
    fn test_recovers_turned_pose() {
        let camera = CameraIntrinsics::from_frame(1280, 720);
        // Frontal seed composed with a 20 degree head turn
        let truth_r = Rotation3::new(Vector3::new(std::f64::consts::PI, 0.0, 0.0))
            * Rotation3::new(Vector3::new(0.0, 20f64.to_radians(), 0.0));
        let truth_t = Vector3::new(40.0, -20.0, 900.0);
        let image = project_all(&camera, &truth_r, &truth_t);

        let solution = solve(&camera, &model_points(), &image).expect("should converge");
        assert!(solution.reproj_error < 0.5);
        assert!(solution.rotation.angle_to(&truth_r).to_degrees() < 1.0);
    }

    #[test]
    fn test_degenerate_points_fail_cleanly() {
        let camera = CameraIntrinsics::from_frame(1280, 720);
        // All observations collapsed onto a single pixel: no pose explains
        // this and the solver must report failure, not panic
        let image = vec![(640.0, 360.0); 6];
        assert!(solve(&camera, &model_points(), &image).is_none());
    }
}
