//! Core types for hand-eye (AX = XB) calibration.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec3`, `Iso3`, ...),
//! - SO(3) helpers shared by the closed-form solvers (`skew`, `log_so3`,
//!   `project_to_so3`),
//! - the sensor mount configuration ([`SensorMount`]).

/// Linear algebra type aliases and rotation helpers.
pub mod math;
/// Sensor mount configuration.
pub mod mount;
/// Shared helpers for workspace test suites.
pub mod test_utils;

pub use math::*;
pub use mount::SensorMount;
