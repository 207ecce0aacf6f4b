//! Solver registry.

use crate::HandEyeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed-form hand-eye solver methods, keyed by the canonical names used
/// in calibration front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolverMethod {
    /// Tsai and Lenz, 1989: two-step axis-angle least squares.
    #[serde(rename = "TsaiLenz1989")]
    TsaiLenz,
    /// Park and Martin, 1994: rotation-log polar decomposition.
    #[serde(rename = "ParkMartin1994")]
    ParkMartin,
    /// Horaud and Dornaika, 1995: quaternion null-space.
    #[serde(rename = "HoraudDornaika1995")]
    HoraudDornaika,
    /// Andreff et al., 1999: Kronecker-product linear solve.
    #[serde(rename = "AndreffEtAl1999")]
    Andreff,
    /// Daniilidis, 1999: dual-quaternion null-space.
    #[serde(rename = "Daniilidis1999")]
    Daniilidis,
}

impl SolverMethod {
    /// All registered methods, in registry order.
    pub const ALL: [SolverMethod; 5] = [
        SolverMethod::TsaiLenz,
        SolverMethod::ParkMartin,
        SolverMethod::HoraudDornaika,
        SolverMethod::Andreff,
        SolverMethod::Daniilidis,
    ];

    /// Canonical registry name.
    pub fn name(&self) -> &'static str {
        match self {
            SolverMethod::TsaiLenz => "TsaiLenz1989",
            SolverMethod::ParkMartin => "ParkMartin1994",
            SolverMethod::HoraudDornaika => "HoraudDornaika1995",
            SolverMethod::Andreff => "AndreffEtAl1999",
            SolverMethod::Daniilidis => "Daniilidis1999",
        }
    }

    /// Look up a method by its registry name.
    pub fn from_name(name: &str) -> Result<Self, HandEyeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .ok_or_else(|| HandEyeError::UnknownSolver(name.to_string()))
    }

    /// The registry names, in registry order.
    pub fn names() -> [&'static str; 5] {
        Self::ALL.map(|m| m.name())
    }
}

impl fmt::Display for SolverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolverMethod {
    type Err = HandEyeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_stable() {
        assert_eq!(
            SolverMethod::names(),
            [
                "TsaiLenz1989",
                "ParkMartin1994",
                "HoraudDornaika1995",
                "AndreffEtAl1999",
                "Daniilidis1999",
            ]
        );
    }

    #[test]
    fn lookup_roundtrip() {
        for method in SolverMethod::ALL {
            assert_eq!(SolverMethod::from_name(method.name()).unwrap(), method);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = SolverMethod::from_name("Shiu1989").unwrap_err();
        assert!(matches!(err, HandEyeError::UnknownSolver(name) if name == "Shiu1989"));
    }
}
