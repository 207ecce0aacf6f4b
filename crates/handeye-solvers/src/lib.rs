//! Closed-form solvers for the hand-eye calibration problem AX = XB.
//!
//! Given paired pose streams from a robot effector and a sensor-observed
//! calibration object, each solver estimates the fixed rigid transform `X`
//! between camera and effector from relative motion pairs `(A, B)`.
//!
//! Conventions:
//! - `effector_wrt_world` are effector poses in the world/base frame,
//! - `object_wrt_sensor` are calibration object poses in the sensor frame,
//! - `A = (wTe_i)^-1 * wTe_j` and `B = cTo_i * (cTo_j)^-1`,
//! - the solution `X` is the camera pose in the effector frame.

use handeye_core::Iso3;
use thiserror::Error;

mod andreff;
mod daniilidis;
mod horaud;
mod method;
mod motion;
mod park;
mod translation;
mod tsai;

pub use method::SolverMethod;
pub use motion::{build_motion_pairs, MotionFilter, MotionPair, MIN_POSE_SAMPLES};

/// Errors that can occur during hand-eye calibration.
#[derive(Debug, Error)]
pub enum HandEyeError {
    /// The two pose sample lists have different lengths.
    #[error("pose sample lists differ in size: {effector} effector poses vs {object} object poses")]
    SampleCountMismatch { effector: usize, object: usize },
    /// Not enough pose samples to constrain the solution.
    #[error("need at least 3 pose samples, got {0}")]
    NotEnoughSamples(usize),
    /// The requested solver name is not in the registry.
    #[error("unknown hand-eye solver name: {0}")]
    UnknownSolver(String),
    /// Every candidate motion pair was rejected by the conditioning filter.
    #[error("no usable motion pairs after filtering")]
    NoUsableMotionPairs,
    /// Linear solve (SVD) failed.
    #[error("svd failed during hand-eye estimation")]
    SvdFailed,
    /// The pose stream does not contain enough independent rotation axes.
    #[error("degenerate motion: rotation axes do not span the solution space")]
    DegenerateMotion,
}

/// Solve AX = XB on prepared motion pairs with the selected method.
pub fn solve_motion_pairs(
    pairs: &[MotionPair],
    method: SolverMethod,
) -> Result<Iso3, HandEyeError> {
    if pairs.is_empty() {
        return Err(HandEyeError::NoUsableMotionPairs);
    }
    match method {
        SolverMethod::TsaiLenz => tsai::estimate(pairs),
        SolverMethod::ParkMartin => park::estimate(pairs),
        SolverMethod::HoraudDornaika => horaud::estimate(pairs),
        SolverMethod::Andreff => andreff::estimate(pairs),
        SolverMethod::Daniilidis => daniilidis::estimate(pairs),
    }
}

/// Full calibration entry point: validate the pose streams, build filtered
/// motion pairs and solve for the camera-wrt-effector transform.
pub fn calibrate(
    effector_wrt_world: &[Iso3],
    object_wrt_sensor: &[Iso3],
    method: SolverMethod,
    filter: &MotionFilter,
) -> Result<Iso3, HandEyeError> {
    let pairs = build_motion_pairs(effector_wrt_world, object_wrt_sensor, filter)?;
    solve_motion_pairs(&pairs, method)
}

/// As [`calibrate`], with the solver selected by registry name.
pub fn calibrate_named(
    effector_wrt_world: &[Iso3],
    object_wrt_sensor: &[Iso3],
    solver_name: &str,
    filter: &MotionFilter,
) -> Result<Iso3, HandEyeError> {
    let method = SolverMethod::from_name(solver_name)?;
    calibrate(effector_wrt_world, object_wrt_sensor, method, filter)
}
