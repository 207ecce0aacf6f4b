//! Mathematical type definitions and rotation utilities.
//!
//! The solvers work on rotation matrices, unit quaternions and axis-angle
//! vectors interchangeably; the conversions that need care (double cover,
//! projection back onto SO(3)) live here.

use nalgebra::{Isometry3, Matrix3, Matrix4, Rotation3, Unit, UnitQuaternion, Vector3};

/// Scalar type used throughout the workspace (currently `f64`).
pub type Real = f64;

/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 4×4 matrix with [`Real`] entries.
pub type Mat4 = Matrix4<Real>;
/// 3D rigid transform (SE(3)) using [`Real`].
pub type Iso3 = Isometry3<Real>;
/// Unit quaternion with [`Real`] components.
pub type Quat = UnitQuaternion<Real>;

/// Cross-product (skew-symmetric) matrix of a 3-vector.
pub fn skew(w: &Vec3) -> Mat3 {
    Mat3::new(0.0, -w.z, w.y, w.z, 0.0, -w.x, -w.y, w.x, 0.0)
}

/// Unit quaternion of a rotation matrix with a non-negative scalar part.
///
/// The double cover of SO(3) means `q` and `-q` encode the same rotation;
/// the linear solvers require a consistent sign on both motion chains.
pub fn unit_quat(r: &Mat3) -> Quat {
    let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*r));
    if q.w < 0.0 {
        UnitQuaternion::new_unchecked(-q.into_inner())
    } else {
        q
    }
}

/// log: SO(3) -> so(3) as a 3-vector (axis * angle).
pub fn log_so3(r: &Mat3) -> Vec3 {
    let rot = unit_quat(r);
    let angle = rot.angle();
    if angle < 1e-12 {
        return Vec3::zeros();
    }
    let axis: Unit<Vec3> = rot
        .axis()
        .unwrap_or_else(|| Unit::new_unchecked(Vec3::x_axis().into_inner()));
    axis.into_inner() * angle
}

/// Project a general 3x3 matrix to the closest rotation matrix (SO(3))
/// using SVD. Returns `None` if the SVD does not converge.
pub fn project_to_so3(m: Mat3) -> Option<Mat3> {
    let svd = m.svd(true, true);
    let u = svd.u?;
    let v_t = svd.v_t?;
    let mut r = u * v_t;

    // Ensure det(R) > 0
    if r.determinant() < 0.0 {
        let mut u_flipped = u;
        u_flipped.column_mut(2).neg_mut();
        r = u_flipped * v_t;
    }
    Some(r)
}

/// Assemble a rigid transform from a rotation matrix and a translation.
pub fn iso_from_rotation_translation(rot: &Mat3, t: &Vec3) -> Iso3 {
    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*rot));
    Iso3::from_parts(nalgebra::Translation3::from(*t), rotation)
}

/// Angle in radians between the rotations of two rigid transforms.
pub fn rotation_angle(a: &Iso3, b: &Iso3) -> Real {
    let r_a = a.rotation.to_rotation_matrix();
    let r_b = b.rotation.to_rotation_matrix();
    let r_diff = r_a.transpose() * r_b;
    let trace = r_diff.matrix().trace();
    let cos_theta = ((trace - 1.0) * 0.5).clamp(-1.0, 1.0);
    cos_theta.acos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Translation3;

    #[test]
    fn skew_matches_cross_product() {
        let a = Vec3::new(0.3, -1.2, 2.0);
        let b = Vec3::new(-0.7, 0.4, 1.1);
        let diff = (skew(&a) * b - a.cross(&b)).norm();
        assert!(diff < 1e-15, "skew mismatch: {}", diff);
    }

    #[test]
    fn unit_quat_has_positive_scalar() {
        // A rotation by more than pi flips the quaternion hemisphere.
        let r = Rotation3::from_axis_angle(&Vec3::z_axis(), 3.5).into_inner();
        let q = unit_quat(&r);
        assert!(q.w >= 0.0);
        let diff = (q.to_rotation_matrix().into_inner() - r).norm();
        assert!(diff < 1e-12, "quaternion does not reproduce rotation");
    }

    #[test]
    fn log_so3_roundtrip() {
        let w = Vec3::new(0.2, -0.1, 0.3);
        let r = Rotation3::from_scaled_axis(w).into_inner();
        let diff = (log_so3(&r) - w).norm();
        assert!(diff < 1e-12, "log mismatch: {}", diff);
    }

    #[test]
    fn project_to_so3_repairs_scaled_rotation() {
        let r = Rotation3::from_euler_angles(0.4, -0.2, 0.9).into_inner();
        let projected = project_to_so3(r * 1.7).unwrap();
        assert!((projected - r).norm() < 1e-12);
        assert!((projected.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_angle_between_known_poses() {
        let a = Iso3::identity();
        let b = Iso3::from_parts(
            Translation3::new(1.0, 0.0, 0.0),
            Rotation3::from_axis_angle(&Vec3::y_axis(), 0.25).into(),
        );
        assert!((rotation_angle(&a, &b) - 0.25).abs() < 1e-12);
    }
}
