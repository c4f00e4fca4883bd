//! World cities and countries.
//!
//! This module provides:
//! - [`City`], [`Country`] and [`CapitalType`] location types
//! - [`Atlas`], the registry that owns every loaded country and city
//! - CSV loading via [`Atlas::from_csv_path`]
//!
//! # Example
//!
//! ```
//! use navigator::atlas::Atlas;
//!
//! let atlas = Atlas::example();
//! let melbourne = atlas.country("Australia").unwrap().city("Melbourne").unwrap();
//! let sydney = atlas.country("Australia").unwrap().city("Sydney").unwrap();
//! assert!(melbourne.distance(&sydney) > 700);
//! ```

mod csv_reader;
pub mod location;

pub use location::{CapitalType, City, Coordinate, Country, EARTH_RADIUS_KM};

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{NavError, Result};

/// Registry of countries and cities.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    countries: Vec<Country>,
    country_index: HashMap<String, usize>,
    cities: Vec<Arc<City>>,
    city_index: HashMap<String, usize>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a country unless one with the same name already exists.
    pub fn add_country(&mut self, name: &str, iso3: &str) {
        if self.country_index.contains_key(name) {
            return;
        }
        self.country_index
            .insert(name.to_string(), self.countries.len());
        self.countries.push(Country::new(name, iso3));
    }

    /// Register a city under an existing country.
    ///
    /// A city whose id is already known replaces the previous entry in the
    /// city registry, keeping its position.
    pub fn add_city(
        &mut self,
        name: &str,
        latitude: &str,
        longitude: &str,
        country: &str,
        capital_type: &str,
        id: &str,
    ) -> Result<Arc<City>> {
        let country_idx =
            *self
                .country_index
                .get(country)
                .ok_or_else(|| NavError::UnknownCountry {
                    name: country.to_string(),
                })?;

        let city = Arc::new(City {
            id: id.to_string(),
            name: name.to_string(),
            coordinate: Coordinate::new(
                parse_degrees(name, latitude)?,
                parse_degrees(name, longitude)?,
            ),
            capital_type: CapitalType::from_raw(capital_type),
            country: country.to_string(),
            iso3: self.countries[country_idx].iso3.clone(),
        });

        match self.city_index.get(id) {
            Some(&idx) => {
                tracing::debug!("City id {} registered twice, replacing {}", id, self.cities[idx]);
                self.cities[idx] = Arc::clone(&city);
            }
            None => {
                self.city_index.insert(id.to_string(), self.cities.len());
                self.cities.push(Arc::clone(&city));
            }
        }
        self.countries[country_idx].push_city(Arc::clone(&city));

        Ok(city)
    }

    /// Look up a country by name.
    pub fn country(&self, name: &str) -> Option<&Country> {
        self.country_index.get(name).map(|&i| &self.countries[i])
    }

    /// All countries in registration order.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Look up a city by its data file id.
    pub fn city_by_id(&self, id: &str) -> Option<Arc<City>> {
        self.city_index.get(id).map(|&i| Arc::clone(&self.cities[i]))
    }

    /// All cities in registration order.
    pub fn cities(&self) -> &[Arc<City>] {
        &self.cities
    }

    /// Position of a city in [`Atlas::cities`].
    pub fn position(&self, city: &City) -> Option<usize> {
        self.city_index.get(&city.id).copied()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Cities whose `"Name (ISO)"` contains the term, ignoring case.
    pub fn search(&self, term: &str) -> Vec<Arc<City>> {
        self.cities
            .iter()
            .filter(|c| c.matches(term))
            .cloned()
            .collect()
    }

    /// Resolve a term to its first search match.
    pub fn resolve(&self, term: &str) -> Result<Arc<City>> {
        let term = term.trim();
        self.cities
            .iter()
            .find(|c| c.matches(term))
            .cloned()
            .ok_or_else(|| NavError::UnknownCity {
                name: term.to_string(),
            })
    }

    /// A handful of Australian and Japanese cities.
    pub fn example() -> Self {
        let mut atlas = Self::new();
        atlas.add_country("Australia", "AUS");
        atlas.add_country("Japan", "JPN");
        let cities = [
            ("Melbourne", "-37.8136", "144.9631", "Australia", "admin", "1036533631"),
            ("Canberra", "-35.2931", "149.1269", "Australia", "primary", "1036142029"),
            ("Sydney", "-33.865", "151.2094", "Australia", "admin", "1036074917"),
            ("Tokyo", "35.6839", "139.7744", "Japan", "primary", "1392685764"),
        ];
        for (name, lat, lng, country, capital, id) in cities {
            // Fixed data, every country is registered above.
            if let Err(e) = atlas.add_city(name, lat, lng, country, capital, id) {
                tracing::error!("Failed to add example city {}: {}", name, e);
            }
        }
        atlas
    }
}

fn parse_degrees(city: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| NavError::InvalidCoordinate {
            city: city.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_atlas_contents() {
        let atlas = Atlas::example();
        assert_eq!(atlas.len(), 4);
        assert_eq!(atlas.countries().len(), 2);
        let australia = atlas.country("Australia").unwrap();
        assert_eq!(australia.cities(&[]).len(), 3);
        assert_eq!(
            australia.city("Canberra").unwrap().capital_type,
            CapitalType::Primary
        );
    }

    #[test]
    fn add_country_first_registration_wins() {
        let mut atlas = Atlas::new();
        atlas.add_country("Japan", "JPN");
        atlas.add_country("Japan", "XXX");
        assert_eq!(atlas.countries().len(), 1);
        assert_eq!(atlas.country("Japan").unwrap().iso3, "JPN");
    }

    #[test]
    fn add_city_requires_country() {
        let mut atlas = Atlas::new();
        let err = atlas
            .add_city("Paris", "48.8566", "2.3522", "France", "primary", "1")
            .unwrap_err();
        assert!(matches!(err, NavError::UnknownCountry { name } if name == "France"));
    }

    #[test]
    fn add_city_rejects_bad_coordinates() {
        let mut atlas = Atlas::new();
        atlas.add_country("France", "FRA");
        let err = atlas
            .add_city("Paris", "north", "2.3522", "France", "primary", "1")
            .unwrap_err();
        assert!(matches!(err, NavError::InvalidCoordinate { .. }));
    }

    #[test]
    fn add_city_takes_iso3_from_country() {
        let mut atlas = Atlas::new();
        atlas.add_country("France", "fra");
        let paris = atlas
            .add_city("Paris", "48.8566", "2.3522", "France", "primary", "1")
            .unwrap();
        assert_eq!(paris.to_string(), "Paris (FRA)");
    }

    #[test]
    fn duplicate_city_id_replaces_registry_entry() {
        let mut atlas = Atlas::new();
        atlas.add_country("France", "FRA");
        atlas
            .add_city("Paris", "48.8566", "2.3522", "France", "primary", "1")
            .unwrap();
        atlas
            .add_city("Lyon", "45.76", "4.84", "France", "admin", "2")
            .unwrap();
        atlas
            .add_city("Paris Nord", "48.9", "2.35", "France", "", "1")
            .unwrap();

        assert_eq!(atlas.len(), 2);
        assert_eq!(atlas.cities()[0].name, "Paris Nord");
        assert_eq!(atlas.city_by_id("1").unwrap().name, "Paris Nord");
        assert_eq!(atlas.country("France").unwrap().cities(&[]).len(), 3);
    }

    #[test]
    fn search_matches_name_and_iso() {
        let atlas = Atlas::example();
        let names: Vec<_> = atlas.search("AUS").iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Melbourne", "Canberra", "Sydney"]);
        assert_eq!(atlas.search("tok").len(), 1);
        assert!(atlas.search("paris").is_empty());
    }

    #[test]
    fn resolve_returns_first_match_or_error() {
        let atlas = Atlas::example();
        assert_eq!(atlas.resolve(" syd ").unwrap().name, "Sydney");
        assert!(matches!(
            atlas.resolve("Osaka"),
            Err(NavError::UnknownCity { .. })
        ));
    }

    #[test]
    fn position_follows_registration_order() {
        let atlas = Atlas::example();
        let tokyo = atlas.resolve("Tokyo").unwrap();
        assert_eq!(atlas.position(&tokyo), Some(3));
    }
}
