//! Horaud–Dornaika quaternion null-space solver.
//!
//! The rotation constraint `q_A ⊗ q_X = q_X ⊗ q_B` is linear in `q_X`;
//! stacking `L(q_A) - R(q_B)` over all pairs and taking the smallest
//! singular direction yields the rotation, translation follows by least
//! squares.

use crate::{translation, HandEyeError, MotionPair};
use handeye_core::{iso_from_rotation_translation, unit_quat, Iso3, Mat4, Quat, Real};
use nalgebra::{DMatrix, Quaternion, UnitQuaternion};

fn quat_left(q: &Quat) -> Mat4 {
    let w = q.w;
    let (x, y, z) = (q.i, q.j, q.k);
    Mat4::new(w, -x, -y, -z, x, w, -z, y, y, z, w, -x, z, -y, x, w)
}

fn quat_right(q: &Quat) -> Mat4 {
    let w = q.w;
    let (x, y, z) = (q.i, q.j, q.k);
    Mat4::new(w, -x, -y, -z, x, w, z, -y, y, -z, w, x, z, y, -x, w)
}

pub(crate) fn estimate(pairs: &[MotionPair]) -> Result<Iso3, HandEyeError> {
    let num_pairs = pairs.len();
    let mut m = DMatrix::<Real>::zeros(4 * num_pairs, 4);

    for (idx, p) in pairs.iter().enumerate() {
        let qa = unit_quat(&p.rot_a);
        let qb = unit_quat(&p.rot_b);

        let row_start = 4 * idx;
        m.view_mut((row_start, 0), (4, 4))
            .copy_from(&(quat_left(&qa) - quat_right(&qb)));
    }

    let svd = m.svd(false, true);
    let v_t = svd.v_t.ok_or(HandEyeError::SvdFailed)?;
    let q_vec = v_t.row(v_t.nrows() - 1);

    let q = Quaternion::new(q_vec[0], q_vec[1], q_vec[2], q_vec[3]).normalize();
    let rot_x = UnitQuaternion::from_quaternion(q)
        .to_rotation_matrix()
        .into_inner();

    let tra_x = translation::estimate(pairs, &rot_x)?;
    Ok(iso_from_rotation_translation(&rot_x, &tra_x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_motion_pairs, MotionFilter};
    use handeye_core::test_utils::{
        eye_in_hand_object_poses, make_iso, pose_error, synthetic_effector_poses,
    };

    #[test]
    fn recovers_ground_truth() {
        let x_gt = make_iso((0.2, -0.1, 0.05), (0.1, -0.05, 0.2));
        let y_gt = make_iso((-0.1, 0.05, 0.2), (-0.2, 0.1, 1.0));

        let effector = synthetic_effector_poses(6);
        let object = eye_in_hand_object_poses(&effector, &x_gt, &y_gt);

        let pairs = build_motion_pairs(&effector, &object, &MotionFilter::default()).unwrap();
        let x_est = estimate(&pairs).unwrap();

        let (dt, ang) = pose_error(&x_est, &x_gt);
        assert!(dt < 1e-6, "translation error too large: {}", dt);
        assert!(ang < 1e-6, "rotation error too large: {}", ang);
    }
}
