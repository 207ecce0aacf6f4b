//! Park–Martin rotation-log solver.
//!
//! With `α = log R_A` and `β = log R_B`, the rotation satisfies
//! `α = R_X β` for every pair; the closed form is the polar factor
//! `R_X = (MᵀM)^{-1/2} Mᵀ` of `M = Σ β αᵀ`.

use crate::{translation, HandEyeError, MotionPair};
use handeye_core::{iso_from_rotation_translation, log_so3, project_to_so3, Iso3, Mat3};

pub(crate) fn estimate(pairs: &[MotionPair]) -> Result<Iso3, HandEyeError> {
    let mut m = Mat3::zeros();
    for p in pairs {
        let alpha = log_so3(&p.rot_a);
        let beta = log_so3(&p.rot_b);
        m += beta * alpha.transpose();
    }

    let mtm = m.transpose() * m;
    let eig = mtm.symmetric_eigen();
    if eig.eigenvalues.min() < 1e-12 {
        // Axes confined to a plane or line cannot pin down the rotation.
        return Err(HandEyeError::DegenerateMotion);
    }

    let mut inv_sqrt = Mat3::zeros();
    for i in 0..3 {
        let v = eig.eigenvectors.column(i);
        inv_sqrt += (v * v.transpose()) / eig.eigenvalues[i].sqrt();
    }

    let rot_x =
        project_to_so3(inv_sqrt * m.transpose()).ok_or(HandEyeError::SvdFailed)?;

    let tra_x = translation::estimate(pairs, &rot_x)?;
    Ok(iso_from_rotation_translation(&rot_x, &tra_x))
}
