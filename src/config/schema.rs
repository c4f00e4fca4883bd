//! Configuration schema definitions.
//!
//! These structs map to the `navigator.yml` file format.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::map::Projection;
use crate::vehicle::{example_fleet, Vehicle};

/// Default city data file, looked up relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "data/worldcities_truncated.csv";

/// Root configuration structure for navigator.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// City data CSV file.
    pub data_file: PathBuf,

    /// Vehicles available when the system starts.
    pub fleet: Vec<Vehicle>,

    /// Whether to add the example trips at startup.
    pub example_trips: bool,

    /// Trip simulation settings.
    pub simulation: SimulationSettings,

    /// Map export settings.
    pub map: MapSettings,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            fleet: example_fleet(),
            example_trips: true,
            simulation: SimulationSettings::default(),
            map: MapSettings::default(),
        }
    }
}

/// Trip simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Wall-clock milliseconds per simulated hour.
    pub tick_ms: u64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self { tick_ms: 100 }
    }
}

/// Map export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Directory exported maps are written to.
    pub output_dir: PathBuf,

    /// Map projection.
    pub projection: Projection,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            projection: Projection::Mercator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = NavConfig::default();
        assert_eq!(config.data_file, PathBuf::from("data/worldcities_truncated.csv"));
        assert_eq!(config.fleet.len(), 3);
        assert!(config.example_trips);
        assert_eq!(config.simulation.tick_ms, 100);
        assert_eq!(config.map.projection, Projection::Mercator);
    }

    #[test]
    fn empty_yaml_uses_defaults() {
        let config: NavConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, NavConfig::default());
    }

    #[test]
    fn partial_yaml_overrides_fields() {
        let yaml = r#"
data_file: data/cities.csv
fleet:
  - kind: crappy_crepe_car
    speed: 120
simulation:
  tick_ms: 5
map:
  projection: cyl
"#;
        let config: NavConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.data_file, PathBuf::from("data/cities.csv"));
        assert_eq!(config.fleet, vec![Vehicle::CrappyCrepeCar { speed: 120 }]);
        assert_eq!(config.simulation.tick_ms, 5);
        assert_eq!(config.map.projection, Projection::Equirectangular);
        assert_eq!(config.map.output_dir, PathBuf::from("."));
        assert!(config.example_trips);
    }
}
