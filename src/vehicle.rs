//! Vehicles and their travel rules.
//!
//! Every vehicle computes the duration of a direct trip between two cities
//! in whole hours, or `None` when it cannot make that trip at all.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::atlas::{CapitalType, City};
use crate::error::NavError;

/// A mode of transportation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Vehicle {
    /// Flies between any two cities at a single speed.
    CrappyCrepeCar { speed: u32 },
    /// Any two cities of one country, or two primary capitals of different
    /// countries, with a speed for each case.
    DiplomacyDonutDinghy {
        in_country_speed: u32,
        between_primary_speed: u32,
    },
    /// Fixed duration between any two cities closer than `max_distance`.
    TeleportingTarteTrolley { travel_time: u32, max_distance: u32 },
}

impl Vehicle {
    /// Duration of a direct trip in hours, rounded up.
    ///
    /// Returns `None` if the trip is not possible for this vehicle.
    pub fn travel_time(&self, departure: &City, arrival: &City) -> Option<u32> {
        match *self {
            Self::CrappyCrepeCar { speed } => hours(departure.distance(arrival), speed),
            Self::DiplomacyDonutDinghy {
                in_country_speed,
                between_primary_speed,
            } => {
                if departure.same_country(arrival) {
                    hours(departure.distance(arrival), in_country_speed)
                } else if departure.capital_type == CapitalType::Primary
                    && arrival.capital_type == CapitalType::Primary
                {
                    hours(departure.distance(arrival), between_primary_speed)
                } else {
                    None
                }
            }
            Self::TeleportingTarteTrolley {
                travel_time,
                max_distance,
            } => (departure.distance(arrival) < max_distance).then_some(travel_time),
        }
    }

    pub fn kind(&self) -> VehicleKind {
        match self {
            Self::CrappyCrepeCar { .. } => VehicleKind::CrappyCrepeCar,
            Self::DiplomacyDonutDinghy { .. } => VehicleKind::DiplomacyDonutDinghy,
            Self::TeleportingTarteTrolley { .. } => VehicleKind::TeleportingTarteTrolley,
        }
    }

    /// Parameter values in the order of [`VehicleKind::params`].
    pub fn params(&self) -> Vec<u32> {
        match *self {
            Self::CrappyCrepeCar { speed } => vec![speed],
            Self::DiplomacyDonutDinghy {
                in_country_speed,
                between_primary_speed,
            } => vec![in_country_speed, between_primary_speed],
            Self::TeleportingTarteTrolley {
                travel_time,
                max_distance,
            } => vec![travel_time, max_distance],
        }
    }
}

fn hours(distance: u32, speed: u32) -> Option<u32> {
    if speed == 0 {
        return None;
    }
    Some(distance.div_ceil(speed))
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CrappyCrepeCar { speed } => write!(f, "CrappyCrepeCar ({} km/h)", speed),
            Self::DiplomacyDonutDinghy {
                in_country_speed,
                between_primary_speed,
            } => write!(
                f,
                "DiplomacyDonutDinghy ({} km/h | {} km/h)",
                in_country_speed, between_primary_speed
            ),
            Self::TeleportingTarteTrolley {
                travel_time,
                max_distance,
            } => write!(
                f,
                "TeleportingTarteTrolley ({} h | {} km)",
                travel_time, max_distance
            ),
        }
    }
}

/// Parses `car:SPEED`, `dinghy:IN_COUNTRY:BETWEEN_PRIMARY` or
/// `trolley:HOURS:MAX_KM`. Full kind names are accepted too.
impl FromStr for Vehicle {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: String| NavError::InvalidVehicle {
            spec: s.to_string(),
            message,
        };

        let mut parts = s.split(':').map(str::trim);
        let kind_name = parts.next().unwrap_or_default();
        let kind: VehicleKind = kind_name.parse().map_err(invalid)?;

        let values = parts
            .map(|raw| validate_positive_integer(raw).map_err(invalid))
            .collect::<Result<Vec<_>, _>>()?;

        kind.build(&values).ok_or_else(|| {
            invalid(format!(
                "{} takes {} parameter(s), got {}",
                kind.name(),
                kind.params().len(),
                values.len()
            ))
        })
    }
}

/// Validate a vehicle parameter typed by the operator.
///
/// Returns the error message to show when the value is not a positive integer.
pub fn validate_positive_integer(raw: &str) -> Result<u32, String> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| "Please enter an integer".to_string())?;
    if value <= 0 {
        return Err("Please enter a non-zero positive integer.".to_string());
    }
    u32::try_from(value).map_err(|_| format!("Please enter a value up to {}.", u32::MAX))
}

/// One parameter of a vehicle kind, as presented by the add vehicle wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub key: &'static str,
    /// Menu label.
    pub label: &'static str,
    /// Input box title.
    pub title: &'static str,
    /// Input box prompt.
    pub prompt: &'static str,
}

const SPEED_PROMPT: &str = "Please enter a speed in km/h. Only positive integers are allowed.";

const CAR_PARAMS: &[ParamSpec] = &[ParamSpec {
    key: "speed",
    label: "Speed of this CrappyCrepeCar (km/h)",
    title: "Speed of this vehicle",
    prompt: SPEED_PROMPT,
}];

const DINGHY_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        key: "speed_internal",
        label: "Speed within country (km/h)",
        title: "Speed traveling within country",
        prompt: SPEED_PROMPT,
    },
    ParamSpec {
        key: "speed_external",
        label: "Speed across countries (km/h)",
        title: "Speed traveling across countries",
        prompt: SPEED_PROMPT,
    },
];

const TROLLEY_PARAMS: &[ParamSpec] = &[
    ParamSpec {
        key: "timeout",
        label: "Travel time for this TeleportingTarteTrolley (hour)",
        title: "Time duration to travel",
        prompt: "Please enter a time duration in hours. Only positive integers are allowed.",
    },
    ParamSpec {
        key: "distance_limit",
        label: "Maximum distance this TeleportingTarteTrolley can travel (km)",
        title: "Maximum distance to travel",
        prompt: "Please enter a distance in km. Only positive integers are allowed.",
    },
];

/// The kinds of vehicle the system knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleKind {
    CrappyCrepeCar,
    DiplomacyDonutDinghy,
    TeleportingTarteTrolley,
}

impl VehicleKind {
    pub const ALL: [VehicleKind; 3] = [
        Self::CrappyCrepeCar,
        Self::DiplomacyDonutDinghy,
        Self::TeleportingTarteTrolley,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::CrappyCrepeCar => "CrappyCrepeCar",
            Self::DiplomacyDonutDinghy => "DiplomacyDonutDinghy",
            Self::TeleportingTarteTrolley => "TeleportingTarteTrolley",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::CrappyCrepeCar => {
                "The CrappyCrepeCar is a flying car that can travel between any two cities \
                 in the world, but moves pretty slowly."
            }
            Self::DiplomacyDonutDinghy => {
                "The DiplomacyDonutDinghy is a small boat which is licensed to travel on \
                 diplomatic hyperlanes.\n\
                 So it moves extra fast between capital cities.\n\
                 It can also travel between any two cities in the same country.\n\
                 However, it can only move from one country to another via their capitals."
            }
            Self::TeleportingTarteTrolley => {
                "The TeleportingTarteTrolley is a trolley bus that can teleport between any \
                 two cities if they are close enough,\n\
                 regardless of countries.\n\
                 Because teleportation technology is still in its infancy,\n\
                 it takes time to program and execute a blink between two cities."
            }
        }
    }

    pub fn params(&self) -> &'static [ParamSpec] {
        match self {
            Self::CrappyCrepeCar => CAR_PARAMS,
            Self::DiplomacyDonutDinghy => DINGHY_PARAMS,
            Self::TeleportingTarteTrolley => TROLLEY_PARAMS,
        }
    }

    /// Build a vehicle from parameter values in [`VehicleKind::params`] order.
    ///
    /// Returns `None` if the number of values does not match.
    pub fn build(&self, values: &[u32]) -> Option<Vehicle> {
        match (self, values) {
            (Self::CrappyCrepeCar, &[speed]) => Some(Vehicle::CrappyCrepeCar { speed }),
            (Self::DiplomacyDonutDinghy, &[in_country_speed, between_primary_speed]) => {
                Some(Vehicle::DiplomacyDonutDinghy {
                    in_country_speed,
                    between_primary_speed,
                })
            }
            (Self::TeleportingTarteTrolley, &[travel_time, max_distance]) => {
                Some(Vehicle::TeleportingTarteTrolley {
                    travel_time,
                    max_distance,
                })
            }
            _ => None,
        }
    }
}

impl FromStr for VehicleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "car" | "crappycrepecar" => Ok(Self::CrappyCrepeCar),
            "dinghy" | "diplomacydonutdinghy" => Ok(Self::DiplomacyDonutDinghy),
            "trolley" | "teleportingtartetrolley" => Ok(Self::TeleportingTarteTrolley),
            _ => Err(format!(
                "unknown vehicle kind '{}' (expected car, dinghy or trolley)",
                s
            )),
        }
    }
}

impl fmt::Display for VehicleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The fleet every new system starts with.
pub fn example_fleet() -> Vec<Vehicle> {
    vec![
        Vehicle::CrappyCrepeCar { speed: 200 },
        Vehicle::DiplomacyDonutDinghy {
            in_country_speed: 100,
            between_primary_speed: 500,
        },
        Vehicle::TeleportingTarteTrolley {
            travel_time: 3,
            max_distance: 2000,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::Atlas;
    use std::sync::Arc;

    fn cities() -> (Arc<City>, Arc<City>, Arc<City>, Arc<City>) {
        let atlas = Atlas::example();
        (
            atlas.resolve("Melbourne").unwrap(),
            atlas.resolve("Canberra").unwrap(),
            atlas.resolve("Sydney").unwrap(),
            atlas.resolve("Tokyo").unwrap(),
        )
    }

    #[test]
    fn car_rounds_hours_up() {
        let (melbourne, _, sydney, _) = cities();
        let car = Vehicle::CrappyCrepeCar { speed: 200 };
        // ~713 km
        assert_eq!(car.travel_time(&melbourne, &sydney), Some(4));
    }

    #[test]
    fn car_same_city_is_zero_hours() {
        let (melbourne, ..) = cities();
        let car = Vehicle::CrappyCrepeCar { speed: 200 };
        assert_eq!(car.travel_time(&melbourne, &melbourne), Some(0));
    }

    #[test]
    fn dinghy_in_country_uses_in_country_speed() {
        let (melbourne, _, sydney, _) = cities();
        let dinghy = Vehicle::DiplomacyDonutDinghy {
            in_country_speed: 100,
            between_primary_speed: 500,
        };
        let expected = melbourne.distance(&sydney).div_ceil(100);
        assert_eq!(dinghy.travel_time(&melbourne, &sydney), Some(expected));
    }

    #[test]
    fn dinghy_between_primary_capitals() {
        let (_, canberra, _, tokyo) = cities();
        let dinghy = Vehicle::DiplomacyDonutDinghy {
            in_country_speed: 100,
            between_primary_speed: 500,
        };
        let expected = canberra.distance(&tokyo).div_ceil(500);
        assert_eq!(dinghy.travel_time(&canberra, &tokyo), Some(expected));
    }

    #[test]
    fn dinghy_rejects_non_primary_across_countries() {
        let (melbourne, _, _, tokyo) = cities();
        let dinghy = Vehicle::DiplomacyDonutDinghy {
            in_country_speed: 100,
            between_primary_speed: 500,
        };
        assert_eq!(dinghy.travel_time(&melbourne, &tokyo), None);
        assert_eq!(dinghy.travel_time(&tokyo, &melbourne), None);
    }

    #[test]
    fn trolley_is_fixed_time_within_range() {
        let (melbourne, canberra, sydney, _) = cities();
        let trolley = Vehicle::TeleportingTarteTrolley {
            travel_time: 1,
            max_distance: 500,
        };
        // ~466 km
        assert_eq!(trolley.travel_time(&melbourne, &canberra), Some(1));
        // ~713 km
        assert_eq!(trolley.travel_time(&melbourne, &sydney), None);
    }

    #[test]
    fn trolley_max_distance_is_exclusive() {
        let (melbourne, canberra, ..) = cities();
        let exact = melbourne.distance(&canberra);
        let trolley = Vehicle::TeleportingTarteTrolley {
            travel_time: 1,
            max_distance: exact,
        };
        assert_eq!(trolley.travel_time(&melbourne, &canberra), None);
    }

    #[test]
    fn zero_speed_is_impossible() {
        let (melbourne, _, sydney, _) = cities();
        let car = Vehicle::CrappyCrepeCar { speed: 0 };
        assert_eq!(car.travel_time(&melbourne, &sydney), None);
    }

    #[test]
    fn display_formats() {
        let fleet = example_fleet();
        assert_eq!(fleet[0].to_string(), "CrappyCrepeCar (200 km/h)");
        assert_eq!(
            fleet[1].to_string(),
            "DiplomacyDonutDinghy (100 km/h | 500 km/h)"
        );
        assert_eq!(fleet[2].to_string(), "TeleportingTarteTrolley (3 h | 2000 km)");
    }

    #[test]
    fn parse_short_specs() {
        assert_eq!(
            "car:150".parse::<Vehicle>().unwrap(),
            Vehicle::CrappyCrepeCar { speed: 150 }
        );
        assert_eq!(
            "Dinghy:80:400".parse::<Vehicle>().unwrap(),
            Vehicle::DiplomacyDonutDinghy {
                in_country_speed: 80,
                between_primary_speed: 400
            }
        );
        assert_eq!(
            "TeleportingTarteTrolley: 2 : 900".parse::<Vehicle>().unwrap(),
            Vehicle::TeleportingTarteTrolley {
                travel_time: 2,
                max_distance: 900
            }
        );
    }

    #[test]
    fn parse_rejects_bad_specs() {
        assert!("boat:10".parse::<Vehicle>().is_err());
        assert!("car".parse::<Vehicle>().is_err());
        assert!("car:0".parse::<Vehicle>().is_err());
        assert!("dinghy:10".parse::<Vehicle>().is_err());
        assert!("car:fast".parse::<Vehicle>().is_err());
    }

    #[test]
    fn positive_integer_validation_messages() {
        assert_eq!(validate_positive_integer(" 42 "), Ok(42));
        assert_eq!(
            validate_positive_integer("abc"),
            Err("Please enter an integer".to_string())
        );
        assert_eq!(
            validate_positive_integer("0"),
            Err("Please enter a non-zero positive integer.".to_string())
        );
        assert_eq!(
            validate_positive_integer("-3"),
            Err("Please enter a non-zero positive integer.".to_string())
        );
        assert!(validate_positive_integer("99999999999").is_err());
    }

    #[test]
    fn kinds_build_from_params() {
        for vehicle in example_fleet() {
            let kind = vehicle.kind();
            assert_eq!(kind.params().len(), vehicle.params().len());
            assert_eq!(kind.build(&vehicle.params()), Some(vehicle));
        }
        assert_eq!(VehicleKind::CrappyCrepeCar.build(&[1, 2]), None);
    }

    #[test]
    fn serde_uses_kind_tag() {
        let yaml = "kind: teleporting_tarte_trolley\ntravel_time: 3\nmax_distance: 2000\n";
        let vehicle: Vehicle = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(vehicle, example_fleet()[2]);
    }
}
