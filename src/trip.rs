//! Trips: ordered sequences of cities.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::atlas::City;
use crate::vehicle::Vehicle;

/// An ordered sequence of cities, starting at the departure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    cities: Vec<Arc<City>>,
}

impl Trip {
    /// Start a trip at the departure city.
    pub fn new(departure: Arc<City>) -> Self {
        Self {
            cities: vec![departure],
        }
    }

    /// Build a trip from a list of cities; `None` if the list is empty.
    pub fn from_cities(cities: Vec<Arc<City>>) -> Option<Self> {
        if cities.is_empty() {
            None
        } else {
            Some(Self { cities })
        }
    }

    /// Add the next city to this trip.
    pub fn add_next_city(&mut self, city: Arc<City>) {
        self.cities.push(city);
    }

    /// Remove the city at `index`, returning it.
    ///
    /// The departure cannot be removed from a single-city trip; callers drop
    /// the trip instead.
    pub fn remove(&mut self, index: usize) -> Option<Arc<City>> {
        if index >= self.cities.len() || self.cities.len() == 1 {
            return None;
        }
        Some(self.cities.remove(index))
    }

    pub fn cities(&self) -> &[Arc<City>] {
        &self.cities
    }

    pub fn departure(&self) -> &Arc<City> {
        &self.cities[0]
    }

    pub fn arrival(&self) -> &Arc<City> {
        &self.cities[self.cities.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always false: a trip has at least its departure city.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Consecutive (from, to) pairs.
    pub fn legs(&self) -> impl Iterator<Item = (&Arc<City>, &Arc<City>)> {
        self.cities.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.cities.len() - 1
    }

    /// Hours taken by each leg, or `None` if any leg is impossible.
    pub fn leg_times(&self, vehicle: &Vehicle) -> Option<Vec<u32>> {
        self.legs()
            .map(|(from, to)| vehicle.travel_time(from, to))
            .collect()
    }

    /// Total hours for the whole trip, or `None` if any leg is impossible.
    ///
    /// Legs are summed in `u64` so many long legs cannot overflow.
    pub fn total_travel_time(&self, vehicle: &Vehicle) -> Option<u64> {
        self.leg_times(vehicle)
            .map(|times| times.iter().copied().map(u64::from).sum())
    }

    /// The vehicle for which this trip is fastest and the trip duration.
    ///
    /// Ties go to the earliest vehicle. Returns `None` if no vehicle can
    /// complete the trip.
    pub fn fastest_vehicle(&self, vehicles: &[Vehicle]) -> Option<(usize, u64)> {
        vehicles
            .iter()
            .enumerate()
            .filter_map(|(i, v)| self.total_travel_time(v).map(|t| (i, t)))
            .fold(None, |best, (i, t)| match best {
                Some((_, best_t)) if best_t <= t => best,
                _ => Some((i, t)),
            })
    }

    /// City names joined by underscores, safe to use as a file name.
    ///
    /// Path separators and other characters that are unsafe in file names
    /// become `-`, and `..` runs collapse to a single `.`, so the slug never
    /// leaves the directory it is joined onto.
    pub fn slug(&self) -> String {
        let joined = self
            .cities
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join("_");
        let mut slug: String = joined
            .chars()
            .map(|ch| match ch {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
                ch if ch.is_control() => '-',
                ch => ch,
            })
            .collect();
        while slug.contains("..") {
            slug = slug.replace("..", ".");
        }
        slug
    }
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.cities.iter().map(|c| c.to_string()).collect();
        f.write_str(&parts.join(" -> "))
    }
}
