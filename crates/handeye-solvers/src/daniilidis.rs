//! Daniilidis dual-quaternion solver.
//!
//! Each motion is a unit dual quaternion; the screw congruence
//! `â x̂ = x̂ b̂` is linear in the eight components of `x̂`. The stacked
//! 6n×8 system has a two-dimensional null space, recombined under the unit
//! and orthogonality constraints of a rigid transform. Rotation and
//! translation are decoded together, so no separate translation solve is
//! needed.

use crate::{HandEyeError, MotionPair};
use handeye_core::{skew, unit_quat, Iso3, Mat3, Real, Vec3};
use nalgebra::{DMatrix, Quaternion, Translation3, UnitQuaternion, Vector4};

/// Dual quaternion (real, dual) of a rigid motion.
fn dual_quat(rot: &Mat3, tra: &Vec3) -> (Quaternion<Real>, Quaternion<Real>) {
    let q = unit_quat(rot).into_inner();
    let t = Quaternion::from_imag(*tra);
    (q, (t * q) * 0.5)
}

pub(crate) fn estimate(pairs: &[MotionPair]) -> Result<Iso3, HandEyeError> {
    let num_pairs = pairs.len();
    let mut m = DMatrix::<Real>::zeros(6 * num_pairs, 8);

    for (idx, p) in pairs.iter().enumerate() {
        let (a, a_dual) = dual_quat(&p.rot_a, &p.tra_a);
        let (b, b_dual) = dual_quat(&p.rot_b, &p.tra_b);

        let av = a.imag();
        let bv = b.imag();
        let adv = a_dual.imag();
        let bdv = b_dual.imag();

        let row = 6 * idx;
        // Real part: (a - b) q0 + skew(a + b) q
        m.view_mut((row, 0), (3, 1)).copy_from(&(av - bv));
        m.view_mut((row, 1), (3, 3)).copy_from(&skew(&(av + bv)));
        // Dual part couples q and q'
        m.view_mut((row + 3, 0), (3, 1)).copy_from(&(adv - bdv));
        m.view_mut((row + 3, 1), (3, 3))
            .copy_from(&skew(&(adv + bdv)));
        m.view_mut((row + 3, 4), (3, 1)).copy_from(&(av - bv));
        m.view_mut((row + 3, 5), (3, 3)).copy_from(&skew(&(av + bv)));
    }

    let svd = m.svd(false, true);
    let v_t = svd.v_t.ok_or(HandEyeError::SvdFailed)?;

    // The two smallest singular directions span the solution space.
    let v7 = v_t.row(v_t.nrows() - 2);
    let v8 = v_t.row(v_t.nrows() - 1);
    let u1 = Vector4::new(v7[0], v7[1], v7[2], v7[3]);
    let w1 = Vector4::new(v7[4], v7[5], v7[6], v7[7]);
    let u2 = Vector4::new(v8[0], v8[1], v8[2], v8[3]);
    let w2 = Vector4::new(v8[4], v8[5], v8[6], v8[7]);

    // x̂ = λ v7 + μ v8 with ‖real‖ = 1 and real ⊥ dual:
    //   λ² u1ᵀw1 + λμ (u1ᵀw2 + u2ᵀw1) + μ² u2ᵀw2 = 0
    let qa = u1.dot(&w1);
    let qb = u1.dot(&w2) + u2.dot(&w1);
    let qc = u2.dot(&w2);

    let candidates: Vec<Real> = if qa.abs() < 1e-12 {
        if qb.abs() < 1e-12 {
            return Err(HandEyeError::DegenerateMotion);
        }
        vec![-qc / qb]
    } else {
        let disc = qb * qb - 4.0 * qa * qc;
        if disc < 0.0 {
            return Err(HandEyeError::DegenerateMotion);
        }
        let sq = disc.sqrt();
        vec![(-qb + sq) / (2.0 * qa), (-qb - sq) / (2.0 * qa)]
    };

    // Take the ratio maximising the real-part norm, then scale to unity.
    let mut best: Option<(Real, Real)> = None;
    for s in candidates {
        let val = s * s * u1.dot(&u1) + 2.0 * s * u1.dot(&u2) + u2.dot(&u2);
        if val > best.map_or(0.0, |(v, _)| v) {
            best = Some((val, s));
        }
    }
    let (val, s) = best.ok_or(HandEyeError::DegenerateMotion)?;

    let mu = 1.0 / val.sqrt();
    let lambda = s * mu;

    let q_real = u1 * lambda + u2 * mu;
    let q_dual = w1 * lambda + w2 * mu;

    let real = Quaternion::new(q_real[0], q_real[1], q_real[2], q_real[3]);
    let dual = Quaternion::new(q_dual[0], q_dual[1], q_dual[2], q_dual[3]);

    let rotation = UnitQuaternion::from_quaternion(real);
    let t = ((dual * real.conjugate()) * 2.0 / real.norm_squared()).imag();

    Ok(Iso3::from_parts(Translation3::from(t), rotation))
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
        let x_gt = make_iso((0.15, 0.25, -0.1), (0.08, 0.02, 0.15));
        let y_gt = make_iso((0.05, -0.2, 0.1), (0.3, -0.1, 1.2));

        let effector = synthetic_effector_poses(6);
        let object = eye_in_hand_object_poses(&effector, &x_gt, &y_gt);

        let pairs = build_motion_pairs(&effector, &object, &MotionFilter::default()).unwrap();
        let x_est = estimate(&pairs).unwrap();

        let (dt, ang) = pose_error(&x_est, &x_gt);
        assert!(dt < 1e-6, "translation error too large: {}", dt);
        assert!(ang < 1e-6, "rotation error too large: {}", ang);
    }

    #[test]
    fn dual_quaternion_encodes_the_motion() {
        let pose = make_iso((0.3, -0.2, 0.4), (0.1, 0.2, -0.3));
        let rot = pose.rotation.to_rotation_matrix().into_inner();
        let (q, q_dual) = dual_quat(&rot, &pose.translation.vector);

        // Real part is unit, t = 2 q' q* recovers the translation.
        assert!((q.norm() - 1.0).abs() < 1e-12);
        let t = ((q_dual * q.conjugate()) * 2.0).imag();
        assert!((t - pose.translation.vector).norm() < 1e-12);
    }
}
