//! Andreff Kronecker-product solver.
//!
//! `R_A R_X = R_X R_B` vectorises to `(I₃ ⊗ R_A - R_Bᵀ ⊗ I₃) vec(R_X) = 0`;
//! the stacked null space gives `vec(R_X)` up to scale, fixed by the
//! determinant.

use crate::{translation, HandEyeError, MotionPair};
use handeye_core::{iso_from_rotation_translation, project_to_so3, Iso3, Mat3, Real};
use nalgebra::DMatrix;

pub(crate) fn estimate(pairs: &[MotionPair]) -> Result<Iso3, HandEyeError> {
    let num_pairs = pairs.len();
    let id3 = Mat3::identity();
    let mut m = DMatrix::<Real>::zeros(9 * num_pairs, 9);

    for (idx, p) in pairs.iter().enumerate() {
        let block = id3.kronecker(&p.rot_a) - p.rot_b.transpose().kronecker(&id3);
        m.view_mut((9 * idx, 0), (9, 9)).copy_from(&block);
    }

    let svd = m.svd(false, true);
    let v_t = svd.v_t.ok_or(HandEyeError::SvdFailed)?;
    let vec_r = v_t.row(v_t.nrows() - 1);

    // vec() is column-major, matching nalgebra's storage order.
    let cols: Vec<Real> = vec_r.iter().copied().collect();
    let raw = Mat3::from_column_slice(&cols);

    let det = raw.determinant();
    if det.abs() < 1e-12 {
        return Err(HandEyeError::DegenerateMotion);
    }
    // Signed cube root restores unit determinant and orientation.
    let rot_x = project_to_so3(raw / det.cbrt()).ok_or(HandEyeError::SvdFailed)?;

    let tra_x = translation::estimate(pairs, &rot_x)?;
    Ok(iso_from_rotation_translation(&rot_x, &tra_x))
}
