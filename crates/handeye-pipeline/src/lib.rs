//! Calibrator surface over the hand-eye solver suite.
//!
//! This crate provides the host-facing pieces: a serde-friendly container
//! for accumulated pose samples, the [`HandEyeCalibrator`] that validates,
//! solves and retains the current camera-robot pose, and the
//! [`CalibrationReport`] with residual diagnostics.

mod calibrator;
mod samples;

pub use calibrator::{CalibrationReport, HandEyeCalibrator};
pub use samples::PoseSamples;

pub use handeye_core::SensorMount;
pub use handeye_solvers::{MotionFilter, SolverMethod};
