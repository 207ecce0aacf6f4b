//! Utilities for testing hand-eye calibration algorithms.
//!
//! This module is public to allow use across workspace test suites,
//! but is not intended for production use.

use crate::{rotation_angle, Iso3, Real};
use nalgebra::{Rotation3, Translation3};

/// Build a rigid transform from Euler angles and a translation.
pub fn make_iso(angles: (Real, Real, Real), t: (Real, Real, Real)) -> Iso3 {
    let rot = Rotation3::from_euler_angles(angles.0, angles.1, angles.2);
    let tr = Translation3::new(t.0, t.1, t.2);
    Iso3::from_parts(tr, rot.into())
}

/// Compare two SE(3) poses via translation norm + rotation angle.
pub fn pose_error(a: &Iso3, b: &Iso3) -> (Real, Real) {
    let dt = (a.translation.vector - b.translation.vector).norm();
    (dt, rotation_angle(a, b))
}

/// Generate a stream of mildly varying effector poses for synthetic
/// hand-eye scenarios. Rotation axes are deliberately spread so that the
/// resulting motion pairs are well conditioned.
pub fn synthetic_effector_poses(num_poses: usize) -> Vec<Iso3> {
    (0..num_poses)
        .map(|k| {
            let kf = k as Real;
            make_iso(
                (0.25 * kf, -0.15 * kf + 0.1, 0.1 * kf * kf * 0.05),
                (0.1 * kf, -0.05 * kf, 0.8 + 0.05 * kf),
            )
        })
        .collect()
}

/// Object-in-sensor poses consistent with `effector_wrt_world`, a ground
/// truth hand-eye transform `x` (camera-wrt-effector) and a fixed object
/// pose `y` (object-wrt-world): `cTo = X^-1 * wTe^-1 * Y`.
pub fn eye_in_hand_object_poses(effector_wrt_world: &[Iso3], x: &Iso3, y: &Iso3) -> Vec<Iso3> {
    effector_wrt_world
        .iter()
        .map(|wte| x.inverse() * wte.inverse() * y)
        .collect()
}

/// Object-in-sensor poses for a fixed camera `x` (camera-wrt-world) and an
/// object rigidly attached to the effector at `z` (object-wrt-effector):
/// `cTo = X^-1 * wTe * Z`.
pub fn eye_to_hand_object_poses(effector_wrt_world: &[Iso3], x: &Iso3, z: &Iso3) -> Vec<Iso3> {
    effector_wrt_world
        .iter()
        .map(|wte| x.inverse() * wte * z)
        .collect()
}
