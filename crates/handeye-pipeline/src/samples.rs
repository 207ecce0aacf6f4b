//! Paired pose samples accumulated during a calibration run.

use handeye_core::Iso3;
use serde::{Deserialize, Serialize};

/// Paired pose samples: one effector pose and one object observation per
/// robot station.
///
/// Hosts typically accumulate these one pair at a time with [`push`]
/// while driving the robot through its stations.
///
/// [`push`]: PoseSamples::push
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseSamples {
    /// Effector poses in the world/base frame (`^W T_E`).
    pub effector_wrt_world: Vec<Iso3>,
    /// Calibration object poses in the sensor frame (`^C T_O`).
    pub object_wrt_sensor: Vec<Iso3>,
}

impl PoseSamples {
    /// Empty sample set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one paired sample.
    pub fn push(&mut self, effector_wrt_world: Iso3, object_wrt_sensor: Iso3) {
        self.effector_wrt_world.push(effector_wrt_world);
        self.object_wrt_sensor.push(object_wrt_sensor);
    }

    /// Number of effector samples (the object count may differ if the
    /// lists were deserialized from inconsistent data; `solve` rejects
    /// that case).
    pub fn len(&self) -> usize {
        self.effector_wrt_world.len()
    }

    /// True when no samples have been recorded.
    pub fn is_empty(&self) -> bool {
        self.effector_wrt_world.is_empty() && self.object_wrt_sensor.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handeye_core::test_utils::make_iso;

    #[test]
    fn push_keeps_lists_paired() {
        let mut samples = PoseSamples::new();
        assert!(samples.is_empty());

        samples.push(
            make_iso((0.1, 0.0, 0.0), (0.5, 0.0, 0.2)),
            make_iso((0.0, 0.1, 0.0), (0.0, 0.1, 1.0)),
        );
        assert_eq!(samples.len(), 1);
        assert_eq!(samples.object_wrt_sensor.len(), 1);
    }

    #[test]
    fn serde_roundtrip() {
        let mut samples = PoseSamples::new();
        samples.push(
            make_iso((0.1, -0.2, 0.3), (0.5, 0.1, 0.2)),
            make_iso((0.0, 0.1, -0.1), (0.0, 0.1, 1.0)),
        );

        let json = serde_json::to_string(&samples).unwrap();
        let back: PoseSamples = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        let diff = (back.effector_wrt_world[0].translation.vector
            - samples.effector_wrt_world[0].translation.vector)
            .norm();
        assert!(diff < 1e-15);
    }
}
