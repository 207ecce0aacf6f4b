use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use handeye_core::SensorMount;
use handeye_pipeline::{
    CalibrationReport, HandEyeCalibrator, MotionFilter, PoseSamples, SolverMethod,
};

/// Hand-eye (AX = XB) calibration from recorded pose samples.
#[derive(Debug, Parser)]
#[command(author, version, about = "Solve AX = XB from paired pose samples")]
struct Args {
    /// Path to a JSON file containing PoseSamples.
    #[arg(long, required_unless_present = "list_solvers")]
    input: Option<String>,

    /// Solver to use (see --list-solvers).
    #[arg(long, default_value = "ParkMartin1994")]
    solver: SolverMethod,

    /// Sensor mount: eye-in-hand or eye-to-hand.
    #[arg(long, default_value_t = SensorMount::EyeInHand)]
    mount: SensorMount,

    /// Minimum rotation (degrees) for a motion pair to be used.
    #[arg(long)]
    min_angle_deg: Option<f64>,

    /// Print the registered solver names and exit.
    #[arg(long)]
    list_solvers: bool,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn run_from_files(
    input_path: &str,
    solver: SolverMethod,
    mount: SensorMount,
    min_angle_deg: Option<f64>,
) -> Result<CalibrationReport> {
    let samples: PoseSamples = load_json_file(Path::new(input_path))?;

    let mut filter = MotionFilter::default();
    if let Some(min_angle) = min_angle_deg {
        filter.min_angle_deg = min_angle;
    }

    let mut calibrator = HandEyeCalibrator::new(filter);
    calibrator.solve(&samples, mount, solver)
}

fn main() {
    env_logger::init();
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();

    if args.list_solvers {
        for name in HandEyeCalibrator::solver_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let input = args.input.context("--input is required")?;
    let report = run_from_files(&input, args.solver, args.mount, args.min_angle_deg)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
