//! Sensor mount configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the sensor is mounted relative to the robot.
///
/// Determines which frame the solved camera pose is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorMount {
    /// Camera mounted on the robot end-effector; the solved transform is
    /// camera-wrt-effector.
    EyeInHand,
    /// Camera fixed in the workspace, observing an object mounted on the
    /// end-effector; the solved transform is camera-wrt-base.
    EyeToHand,
}

impl fmt::Display for SensorMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorMount::EyeInHand => write!(f, "eye-in-hand"),
            SensorMount::EyeToHand => write!(f, "eye-to-hand"),
        }
    }
}

impl FromStr for SensorMount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eye-in-hand" => Ok(SensorMount::EyeInHand),
            "eye-to-hand" => Ok(SensorMount::EyeToHand),
            other => Err(format!(
                "unknown sensor mount '{}', expected 'eye-in-hand' or 'eye-to-hand'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_roundtrip() {
        for mount in [SensorMount::EyeInHand, SensorMount::EyeToHand] {
            let parsed: SensorMount = mount.to_string().parse().unwrap();
            assert_eq!(parsed, mount);
        }
        assert!("on-the-hand".parse::<SensorMount>().is_err());
    }
}
