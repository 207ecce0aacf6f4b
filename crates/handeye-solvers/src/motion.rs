//! Relative motion pairs built from paired pose streams.
//!
//! All solvers consume the same input: for pose indices `i < j`, the
//! relative motion `A` of the effector chain and `B` of the sensor chain.
//! Pairs with too little rotation or near-parallel rotation axes are
//! rejected to keep the linear systems well conditioned.

use crate::HandEyeError;
use handeye_core::{log_so3, project_to_so3, Iso3, Mat3, Real, Vec3};
use log::debug;

/// Minimum number of pose samples required for a unique solution
/// (two independent relative motions).
pub const MIN_POSE_SAMPLES: usize = 3;

/// One relative motion pair for AX = XB.
///
/// `A`: relative motion of the effector chain, `B`: relative motion of the
/// sensor chain.
#[derive(Debug, Clone, Copy)]
pub struct MotionPair {
    pub rot_a: Mat3,
    pub rot_b: Mat3,
    pub tra_a: Vec3,
    pub tra_b: Vec3,
}

/// Conditioning filter applied while building motion pairs.
#[derive(Debug, Clone, Copy)]
pub struct MotionFilter {
    /// Discard pairs whose smaller rotation is below this angle (degrees).
    pub min_angle_deg: Real,
    /// Reject pairs whose effector- and sensor-chain rotation axes are
    /// nearly parallel (ill-conditioned).
    pub reject_axis_parallel: bool,
    /// Sine-of-angle threshold for the axis-parallel rejection.
    pub axis_parallel_eps: Real,
}

impl Default for MotionFilter {
    fn default() -> Self {
        Self {
            min_angle_deg: 1.0,
            reject_axis_parallel: true,
            axis_parallel_eps: 1e-3,
        }
    }
}

/// Build a single motion pair from two pose samples.
///
/// effector_wrt_world_*: ^W T_E
/// object_wrt_sensor_*:  ^C T_O
///
/// A = (^W T_E,i)^(-1) (^W T_E,j)
/// B = (^C T_O,i) (^C T_O,j)^(-1)
fn make_motion_pair(
    effector_wrt_world_i: &Iso3,
    object_wrt_sensor_i: &Iso3,
    effector_wrt_world_j: &Iso3,
    object_wrt_sensor_j: &Iso3,
) -> Result<MotionPair, HandEyeError> {
    let motion_a = effector_wrt_world_i.inverse() * effector_wrt_world_j;
    let motion_b = object_wrt_sensor_i * object_wrt_sensor_j.inverse();

    let rot_a = project_to_so3(*motion_a.rotation.to_rotation_matrix().matrix())
        .ok_or(HandEyeError::SvdFailed)?;
    let rot_b = project_to_so3(*motion_b.rotation.to_rotation_matrix().matrix())
        .ok_or(HandEyeError::SvdFailed)?;

    Ok(MotionPair {
        rot_a,
        rot_b,
        tra_a: motion_a.translation.vector,
        tra_b: motion_b.translation.vector,
    })
}

/// Check if a motion pair is usable:
/// - has sufficient rotation in both chains
/// - optionally rejects near-parallel rotation axes (ill-conditioned)
fn is_usable_pair(
    pair: &MotionPair,
    min_angle: Real,
    reject_axis_parallel: bool,
    axis_parallel_eps: Real,
) -> bool {
    let alpha = log_so3(&pair.rot_a);
    let beta = log_so3(&pair.rot_b);
    let norm_a = alpha.norm();
    let norm_b = beta.norm();
    let min_rot = norm_a.min(norm_b);

    if min_rot < min_angle {
        debug!(
            "motion pair rejected: small rotation {:.3} deg",
            min_rot * 180.0 / std::f64::consts::PI
        );
        return false;
    }

    if reject_axis_parallel && norm_a > 1e-9 && norm_b > 1e-9 {
        let sin_axis = (alpha.normalize().cross(&beta.normalize())).norm();
        if sin_axis < axis_parallel_eps {
            debug!("motion pair rejected: near-parallel axes");
            return false;
        }
    }

    true
}

/// Build all valid motion pairs from the paired pose streams.
///
/// Validates that the streams have equal length and enough samples, then
/// forms every `(i, j)` pair and applies the conditioning filter.
pub fn build_motion_pairs(
    effector_wrt_world: &[Iso3],
    object_wrt_sensor: &[Iso3],
    filter: &MotionFilter,
) -> Result<Vec<MotionPair>, HandEyeError> {
    if effector_wrt_world.len() != object_wrt_sensor.len() {
        return Err(HandEyeError::SampleCountMismatch {
            effector: effector_wrt_world.len(),
            object: object_wrt_sensor.len(),
        });
    }
    if effector_wrt_world.len() < MIN_POSE_SAMPLES {
        return Err(HandEyeError::NotEnoughSamples(effector_wrt_world.len()));
    }

    let num_poses = effector_wrt_world.len();
    let min_angle = filter.min_angle_deg * std::f64::consts::PI / 180.0;

    let mut pairs = Vec::with_capacity(num_poses * (num_poses - 1) / 2);

    for i in 0..(num_poses - 1) {
        for j in (i + 1)..num_poses {
            let pair = make_motion_pair(
                &effector_wrt_world[i],
                &object_wrt_sensor[i],
                &effector_wrt_world[j],
                &object_wrt_sensor[j],
            )?;

            if is_usable_pair(
                &pair,
                min_angle,
                filter.reject_axis_parallel,
                filter.axis_parallel_eps,
            ) {
                pairs.push(pair);
            } else {
                debug!("skipping pair ({},{})", i, j);
            }
        }
    }

    if pairs.is_empty() {
        return Err(HandEyeError::NoUsableMotionPairs);
    }

    Ok(pairs)
}
