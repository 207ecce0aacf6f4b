//! Shared translation recovery for rotation-first solvers.
//!
//! Once the rotation `R_X` is known, every motion pair contributes the
//! linear constraint `(R_A - I) t_X = R_X t_B - t_A`.

use crate::{HandEyeError, MotionPair};
use handeye_core::{Mat3, Real, Vec3};
use nalgebra::{DMatrix, DVector};

/// Least-squares translation estimate over all pairs.
pub(crate) fn estimate(pairs: &[MotionPair], rot_x: &Mat3) -> Result<Vec3, HandEyeError> {
    let num_pairs = pairs.len();
    let mut mat_c = DMatrix::<Real>::zeros(3 * num_pairs, 3);
    let mut vec_w = DVector::<Real>::zeros(3 * num_pairs);

    for (idx, p) in pairs.iter().enumerate() {
        mat_c
            .view_mut((3 * idx, 0), (3, 3))
            .copy_from(&(p.rot_a - Mat3::identity()));

        vec_w
            .rows_mut(3 * idx, 3)
            .copy_from(&(rot_x * p.tra_b - p.tra_a));
    }

    let ridge = 1e-12;
    ridge_llsq(&mat_c, &vec_w, ridge)
}

/// Ridge-regularized least squares:
/// min ||A x - b||^2 + λ ||x||^2
fn ridge_llsq(a: &DMatrix<Real>, b: &DVector<Real>, lambda: Real) -> Result<Vec3, HandEyeError> {
    let m = a.nrows();
    let n = a.ncols(); // always 3 here

    // Build augmented system [A; sqrt(λ) I] x ≈ [b; 0]
    let mut a_aug = DMatrix::<Real>::zeros(m + n, n);
    a_aug.view_mut((0, 0), (m, n)).copy_from(a);

    let sqrt_lambda = lambda.sqrt();
    for i in 0..n {
        a_aug[(m + i, i)] = sqrt_lambda;
    }

    let mut b_aug = DVector::<Real>::zeros(m + n);
    b_aug.rows_mut(0, m).copy_from(b);

    let svd = a_aug.svd(true, true);
    let x = svd
        .solve(&b_aug, 1e-12)
        .map_err(|_| HandEyeError::SvdFailed)?;

    Ok(Vec3::new(x[0], x[1], x[2]))
}
