//! The calibrator: validate samples, dispatch a named solver, retain the
//! camera-robot pose.

use crate::PoseSamples;
use anyhow::{Context, Result};
use handeye_core::{Iso3, Mat3, Real, SensorMount};
use handeye_solvers::{
    build_motion_pairs, solve_motion_pairs, MotionFilter, MotionPair, SolverMethod,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of one calibration solve.
///
/// The residuals measure AX vs XB consistency over the motion pairs the
/// solver actually consumed; on clean data they sit at numerical noise,
/// and they are the first thing to inspect when a calibration looks off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationReport {
    /// Solved transform: camera-wrt-effector (eye-in-hand) or
    /// camera-wrt-base (eye-to-hand).
    pub camera_robot_pose: Iso3,
    /// Method that produced the solution.
    pub method: SolverMethod,
    /// Sensor mount the samples were collected under.
    pub mount: SensorMount,
    /// Number of pose samples supplied.
    pub num_samples: usize,
    /// Number of motion pairs that survived the conditioning filter.
    pub num_motion_pairs: usize,
    /// Mean rotation residual of `A X` vs `X B` (radians).
    pub rotation_residual: Real,
    /// Mean translation residual of `A X` vs `X B` (meters).
    pub translation_residual: Real,
}

/// Solves the hand-eye problem on accumulated pose samples and retains the
/// latest camera-robot pose.
#[derive(Debug, Clone)]
pub struct HandEyeCalibrator {
    filter: MotionFilter,
    camera_robot_pose: Option<Iso3>,
}

impl Default for HandEyeCalibrator {
    fn default() -> Self {
        Self::new(MotionFilter::default())
    }
}

impl HandEyeCalibrator {
    /// Calibrator with the given motion-pair conditioning filter.
    pub fn new(filter: MotionFilter) -> Self {
        Self {
            filter,
            camera_robot_pose: None,
        }
    }

    /// Names of the available solvers, in registry order.
    pub fn solver_names() -> [&'static str; 5] {
        SolverMethod::names()
    }

    /// The camera-robot pose from the most recent successful solve.
    pub fn camera_robot_pose(&self) -> Option<&Iso3> {
        self.camera_robot_pose.as_ref()
    }

    /// Discard the retained pose.
    pub fn reset(&mut self) {
        self.camera_robot_pose = None;
    }

    /// Solve for the camera-robot transform.
    ///
    /// Eye-in-hand solves AX = XB on the streams directly and yields
    /// camera-wrt-effector. Eye-to-hand inverts the effector poses first,
    /// which turns the fixed-camera scenario into the same AX = XB problem
    /// and yields camera-wrt-base. A failed solve leaves the previously
    /// retained pose untouched.
    pub fn solve(
        &mut self,
        samples: &PoseSamples,
        mount: SensorMount,
        method: SolverMethod,
    ) -> Result<CalibrationReport> {
        let effector_wrt_world: Vec<Iso3> = match mount {
            SensorMount::EyeInHand => samples.effector_wrt_world.clone(),
            SensorMount::EyeToHand => samples
                .effector_wrt_world
                .iter()
                .map(|p| p.inverse())
                .collect(),
        };
        debug!(
            "hand-eye solve: {} samples, mount {}, method {}",
            samples.len(),
            mount,
            method
        );

        let pairs = build_motion_pairs(
            &effector_wrt_world,
            &samples.object_wrt_sensor,
            &self.filter,
        )
        .context("building motion pairs from pose samples")?;

        let pose = solve_motion_pairs(&pairs, method)
            .with_context(|| format!("solving AX = XB with {}", method))?;

        let (rotation_residual, translation_residual) = motion_residuals(&pairs, &pose);
        self.camera_robot_pose = Some(pose);

        Ok(CalibrationReport {
            camera_robot_pose: pose,
            method,
            mount,
            num_samples: samples.len(),
            num_motion_pairs: pairs.len(),
            rotation_residual,
            translation_residual,
        })
    }

    /// As [`solve`](Self::solve), with the solver selected by registry name.
    pub fn solve_named(
        &mut self,
        samples: &PoseSamples,
        mount: SensorMount,
        solver_name: &str,
    ) -> Result<CalibrationReport> {
        let method = SolverMethod::from_name(solver_name)?;
        self.solve(samples, mount, method)
    }
}

/// Mean AX vs XB rotation (radians) and translation (meters) residuals.
fn motion_residuals(pairs: &[MotionPair], pose: &Iso3) -> (Real, Real) {
    let rot_x: Mat3 = pose.rotation.to_rotation_matrix().into_inner();
    let tra_x = pose.translation.vector;

    let mut rot_sum = 0.0;
    let mut tra_sum = 0.0;
    for p in pairs {
        let rel = (p.rot_a * rot_x) * (rot_x * p.rot_b).transpose();
        let cos_theta = ((rel.trace() - 1.0) * 0.5).clamp(-1.0, 1.0);
        rot_sum += cos_theta.acos();

        let lhs = p.rot_a * tra_x + p.tra_a;
        let rhs = rot_x * p.tra_b + tra_x;
        tra_sum += (lhs - rhs).norm();
    }

    let n = pairs.len() as Real;
    (rot_sum / n, tra_sum / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use handeye_core::test_utils::{
        eye_in_hand_object_poses, eye_to_hand_object_poses, make_iso, pose_error,
        synthetic_effector_poses,
    };

    fn samples_from(effector: Vec<Iso3>, object: Vec<Iso3>) -> PoseSamples {
        PoseSamples {
            effector_wrt_world: effector,
            object_wrt_sensor: object,
        }
    }

    #[test]
    fn eye_in_hand_recovers_camera_wrt_effector() {
        let x_gt = make_iso((0.2, -0.1, 0.05), (0.1, -0.05, 0.2));
        let y_gt = make_iso((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0));
        let effector = synthetic_effector_poses(6);
        let object = eye_in_hand_object_poses(&effector, &x_gt, &y_gt);
        let samples = samples_from(effector, object);

        let mut calibrator = HandEyeCalibrator::default();
        let report = calibrator
            .solve(&samples, SensorMount::EyeInHand, SolverMethod::ParkMartin)
            .unwrap();

        let (dt, ang) = pose_error(&report.camera_robot_pose, &x_gt);
        assert!(dt < 1e-6 && ang < 1e-6, "dt = {}, ang = {}", dt, ang);
        assert!(report.rotation_residual < 1e-9);
        assert!(report.translation_residual < 1e-9);
        assert_eq!(report.num_samples, 6);

        let retained = calibrator.camera_robot_pose().unwrap();
        let (dt, ang) = pose_error(retained, &x_gt);
        assert!(dt < 1e-6 && ang < 1e-6);
    }

    #[test]
    fn eye_to_hand_recovers_camera_wrt_base() {
        let x_gt = make_iso((0.1, 0.2, -0.3), (1.5, -0.5, 0.8)); // camera wrt base
        let z_gt = make_iso((0.3, -0.1, 0.15), (0.0, 0.05, 0.1)); // object wrt effector
        let effector = synthetic_effector_poses(6);
        let object = eye_to_hand_object_poses(&effector, &x_gt, &z_gt);
        let samples = samples_from(effector, object);

        let mut calibrator = HandEyeCalibrator::default();
        let report = calibrator
            .solve(&samples, SensorMount::EyeToHand, SolverMethod::Daniilidis)
            .unwrap();

        let (dt, ang) = pose_error(&report.camera_robot_pose, &x_gt);
        assert!(dt < 1e-6 && ang < 1e-6, "dt = {}, ang = {}", dt, ang);
    }

    #[test]
    fn failed_solve_keeps_previous_pose() {
        let x_gt = make_iso((0.2, -0.1, 0.05), (0.1, -0.05, 0.2));
        let y_gt = make_iso((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0));
        let effector = synthetic_effector_poses(5);
        let object = eye_in_hand_object_poses(&effector, &x_gt, &y_gt);
        let samples = samples_from(effector, object);

        let mut calibrator = HandEyeCalibrator::default();
        calibrator
            .solve(&samples, SensorMount::EyeInHand, SolverMethod::TsaiLenz)
            .unwrap();

        let mut broken = samples.clone();
        broken.object_wrt_sensor.pop();
        assert!(calibrator
            .solve_named(&broken, SensorMount::EyeInHand, "TsaiLenz1989")
            .is_err());
        assert!(calibrator.camera_robot_pose().is_some());

        assert!(calibrator
            .solve_named(&samples, SensorMount::EyeInHand, "NewtonRaphson")
            .is_err());
        assert!(calibrator.camera_robot_pose().is_some());

        calibrator.reset();
        assert!(calibrator.camera_robot_pose().is_none());
    }

    #[test]
    fn solver_names_match_registry() {
        assert_eq!(HandEyeCalibrator::solver_names(), SolverMethod::names());
    }

    #[test]
    fn report_serializes() {
        let x_gt = make_iso((0.2, -0.1, 0.05), (0.1, -0.05, 0.2));
        let y_gt = make_iso((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0));
        let effector = synthetic_effector_poses(4);
        let object = eye_in_hand_object_poses(&effector, &x_gt, &y_gt);
        let samples = samples_from(effector, object);

        let mut calibrator = HandEyeCalibrator::default();
        let report = calibrator
            .solve(&samples, SensorMount::EyeInHand, SolverMethod::Andreff)
            .unwrap();

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("AndreffEtAl1999"));
        let back: CalibrationReport = serde_json::from_str(&json).unwrap();
        let (dt, ang) = pose_error(&back.camera_robot_pose, &report.camera_robot_pose);
        assert!(dt < 1e-12 && ang < 1e-12);
    }
}
