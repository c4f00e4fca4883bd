//! The navigation system model.
//!
//! [`NavigationSystem`] owns the loaded atlas together with the operator's
//! vehicles and planned trips. Menus and commands receive it explicitly.

use std::path::Path;
use std::sync::Arc;

use crate::atlas::{Atlas, City};
use crate::error::{NavError, Result};
use crate::trip::Trip;
use crate::vehicle::{example_fleet, Vehicle};

/// Cities used by the example trips, as (country, city).
const EXAMPLE_TRIPS: &[&[(&str, &str)]] = &[
    &[
        ("Australia", "Melbourne"),
        ("Malaysia", "Kuala Lumpur"),
        ("Japan", "Tokyo"),
    ],
    &[
        ("Australia", "Melbourne"),
        ("France", "Paris"),
        ("Switzerland", "Bern"),
    ],
    &[
        ("Australia", "Melbourne"),
        ("Australia", "Canberra"),
        ("Malaysia", "Kuala Lumpur"),
    ],
];

/// Vehicles, trips and the atlas they refer to.
#[derive(Debug, Clone, Default)]
pub struct NavigationSystem {
    atlas: Atlas,
    vehicles: Vec<Vehicle>,
    trips: Vec<Trip>,
}

impl NavigationSystem {
    /// Create a system over an atlas, with no vehicles or trips.
    pub fn new(atlas: Atlas) -> Self {
        Self {
            atlas,
            vehicles: Vec::new(),
            trips: Vec::new(),
        }
    }

    /// Load the atlas from a CSV data file.
    pub fn load(data_file: &Path) -> Result<Self> {
        Ok(Self::new(Atlas::from_csv_path(data_file)?))
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        tracing::info!("Added vehicle {}", vehicle);
        self.vehicles.push(vehicle);
    }

    pub fn remove_vehicle(&mut self, index: usize) -> Option<Vehicle> {
        if index >= self.vehicles.len() {
            return None;
        }
        let vehicle = self.vehicles.remove(index);
        tracing::info!("Removed vehicle {}", vehicle);
        Some(vehicle)
    }

    pub fn add_trip(&mut self, trip: Trip) {
        tracing::info!("Added trip {}", trip);
        self.trips.push(trip);
    }

    pub fn remove_trip(&mut self, index: usize) -> Option<Trip> {
        if index >= self.trips.len() {
            return None;
        }
        let trip = self.trips.remove(index);
        tracing::info!("Removed trip {}", trip);
        Some(trip)
    }

    /// Add the example fleet.
    pub fn add_example_vehicles(&mut self) {
        self.vehicles.extend(example_fleet());
    }

    /// Add the example trips between well-known capitals.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCity` if one of the cities is missing from the atlas;
    /// no trip is added in that case.
    pub fn add_example_trips(&mut self) -> Result<()> {
        let mut trips = Vec::with_capacity(EXAMPLE_TRIPS.len());
        for stops in EXAMPLE_TRIPS {
            let cities = stops
                .iter()
                .map(|(country, city)| self.named_city(country, city))
                .collect::<Result<Vec<_>>>()?;
            if let Some(trip) = Trip::from_cities(cities) {
                trips.push(trip);
            }
        }
        self.trips.extend(trips);
        Ok(())
    }

    /// Add the example fleet and trips.
    pub fn create_example_entities(&mut self) -> Result<()> {
        self.add_example_vehicles();
        self.add_example_trips()
    }

    fn named_city(&self, country: &str, city: &str) -> Result<Arc<City>> {
        self.atlas
            .country(country)
            .and_then(|c| c.city(city))
            .ok_or_else(|| NavError::UnknownCity {
                name: format!("{}, {}", city, country),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capitals_atlas() -> Atlas {
        let mut atlas = Atlas::example();
        for (country, iso3) in [
            ("Malaysia", "MYS"),
            ("France", "FRA"),
            ("Switzerland", "CHE"),
        ] {
            atlas.add_country(country, iso3);
        }
        atlas
            .add_city("Kuala Lumpur", "3.1478", "101.6953", "Malaysia", "primary", "1458988644")
            .unwrap();
        atlas
            .add_city("Paris", "48.8566", "2.3522", "France", "primary", "1250015082")
            .unwrap();
        atlas
            .add_city("Bern", "46.948", "7.4474", "Switzerland", "primary", "1756374318")
            .unwrap();
        atlas
    }

    #[test]
    fn example_entities_are_created() {
        let mut system = NavigationSystem::new(capitals_atlas());
        system.create_example_entities().unwrap();
        assert_eq!(system.vehicles().len(), 3);
        assert_eq!(system.trips().len(), 3);
        assert_eq!(
            system.trips()[1].to_string(),
            "Melbourne (AUS) -> Paris (FRA) -> Bern (CHE)"
        );
    }

    #[test]
    fn example_trips_fail_without_cities() {
        let mut system = NavigationSystem::new(Atlas::example());
        let err = system.add_example_trips().unwrap_err();
        assert!(matches!(err, NavError::UnknownCity { name } if name.contains("Kuala Lumpur")));
        assert!(system.trips().is_empty());
    }

    #[test]
    fn add_and_remove_vehicles() {
        let mut system = NavigationSystem::new(Atlas::example());
        system.add_vehicle(Vehicle::CrappyCrepeCar { speed: 10 });
        system.add_vehicle(Vehicle::CrappyCrepeCar { speed: 20 });
        assert_eq!(
            system.remove_vehicle(0),
            Some(Vehicle::CrappyCrepeCar { speed: 10 })
        );
        assert_eq!(system.vehicles().len(), 1);
        assert_eq!(system.remove_vehicle(3), None);
    }

    #[test]
    fn add_and_remove_trips() {
        let mut system = NavigationSystem::new(Atlas::example());
        let sydney = system.atlas().resolve("Sydney").unwrap();
        system.add_trip(Trip::new(sydney));
        assert_eq!(system.trips().len(), 1);
        assert!(system.remove_trip(0).is_some());
        assert!(system.remove_trip(0).is_none());
    }
}
