//! Tsai–Lenz two-step solver.
//!
//! Rotations are encoded as modified Rodrigues vectors `p = 2 sin(θ/2) n`;
//! each pair contributes `skew(p_A + p_B) p' = p_B - p_A`, solved jointly
//! by least squares, and the rotation is reconstructed from `p'`.

use crate::{translation, HandEyeError, MotionPair};
use handeye_core::{
    iso_from_rotation_translation, project_to_so3, skew, unit_quat, Iso3, Mat3, Real, Vec3,
};
use nalgebra::{DMatrix, DVector};

pub(crate) fn estimate(pairs: &[MotionPair]) -> Result<Iso3, HandEyeError> {
    let num_pairs = pairs.len();
    let mut mat = DMatrix::<Real>::zeros(3 * num_pairs, 3);
    let mut rhs = DVector::<Real>::zeros(3 * num_pairs);

    for (idx, p) in pairs.iter().enumerate() {
        // p = 2 sin(θ/2) n, taken from the positive-hemisphere quaternion.
        let pa = unit_quat(&p.rot_a).imag() * 2.0;
        let pb = unit_quat(&p.rot_b).imag() * 2.0;

        mat.view_mut((3 * idx, 0), (3, 3))
            .copy_from(&skew(&(pa + pb)));
        rhs.rows_mut(3 * idx, 3).copy_from(&(pb - pa));
    }

    let svd = mat.svd(true, true);
    let sol = svd.solve(&rhs, 1e-12).map_err(|_| HandEyeError::SvdFailed)?;
    let p_prime = Vec3::new(sol[0], sol[1], sol[2]);

    // Undo the projective scaling, then reconstruct the rotation.
    let p = p_prime * 2.0 / (1.0 + p_prime.norm_squared()).sqrt();
    let np2 = p.norm_squared();
    let rot_raw = Mat3::identity() * (1.0 - np2 * 0.5)
        + (p * p.transpose() + skew(&p) * (4.0 - np2).max(0.0).sqrt()) * 0.5;
    let rot_x = project_to_so3(rot_raw).ok_or(HandEyeError::SvdFailed)?;

    let tra_x = translation::estimate(pairs, &rot_x)?;
    Ok(iso_from_rotation_translation(&rot_x, &tra_x))
}
