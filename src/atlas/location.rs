//! Cities, countries and great-circle distance.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.009;

/// The kind of capital a city is (e.g. "primary").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CapitalType {
    /// National capital.
    Primary,
    /// First-level administrative capital.
    Admin,
    /// Lower-level administrative capital.
    Minor,
    /// Not a capital, or unknown.
    #[default]
    Unspecified,
}

impl CapitalType {
    /// The raw value used in city data files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Admin => "admin",
            Self::Minor => "minor",
            Self::Unspecified => "",
        }
    }

    /// Parse a raw data value; anything unrecognised is `Unspecified`.
    pub fn from_raw(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl FromStr for CapitalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "admin" => Ok(Self::Admin),
            "minor" => Ok(Self::Minor),
            "" => Ok(Self::Unspecified),
            _ => Err(format!("unknown capital type: {}", s)),
        }
    }
}

impl fmt::Display for CapitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position on Earth in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate in kilometers.
    pub fn great_circle_km(&self, other: &Coordinate) -> f64 {
        let (lat1, lng1) = (self.latitude.to_radians(), self.longitude.to_radians());
        let (lat2, lng2) = (other.latitude.to_radians(), other.longitude.to_radians());

        let (sin_lat1, cos_lat1) = lat1.sin_cos();
        let (sin_lat2, cos_lat2) = lat2.sin_cos();
        let (sin_dlng, cos_dlng) = (lng2 - lng1).sin_cos();

        let y = ((cos_lat2 * sin_dlng).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlng).powi(2))
        .sqrt();
        let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlng;

        EARTH_RADIUS_KM * y.atan2(x)
    }
}

/// A city belonging to a country.
///
/// Cities are shared as `Arc<City>` between the atlas, trips and routes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    /// Identifier from the data file.
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    pub capital_type: CapitalType,
    /// Name of the owning country.
    pub country: String,
    /// ISO 3166 alpha-3 code of the owning country.
    pub iso3: String,
}

impl City {
    /// Distance to another city in kilometers, rounded to the nearest integer.
    pub fn distance(&self, other: &City) -> u32 {
        self.coordinate.great_circle_km(&other.coordinate).round() as u32
    }

    /// Whether both cities belong to the same country.
    pub fn same_country(&self, other: &City) -> bool {
        self.country == other.country
    }

    /// Case-insensitive substring match against `"Name (ISO)"`.
    pub fn matches(&self, term: &str) -> bool {
        self.to_string()
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.iso3)
    }
}

/// A country and the cities registered to it.
#[derive(Debug, Clone)]
pub struct Country {
    pub name: String,
    /// Upper-cased ISO 3166 alpha-3 code.
    pub iso3: String,
    cities: Vec<Arc<City>>,
}

impl Country {
    pub fn new(name: &str, iso3: &str) -> Self {
        Self {
            name: name.to_string(),
            iso3: iso3.to_uppercase(),
            cities: Vec::new(),
        }
    }

    pub(crate) fn push_city(&mut self, city: Arc<City>) {
        self.cities.push(city);
    }

    /// Cities of this country, optionally restricted to some capital types.
    ///
    /// An empty filter returns every city.
    pub fn cities(&self, capital_types: &[CapitalType]) -> Vec<Arc<City>> {
        self.cities
            .iter()
            .filter(|c| capital_types.is_empty() || capital_types.contains(&c.capital_type))
            .cloned()
            .collect()
    }

    /// The first city with exactly this name.
    pub fn city(&self, name: &str) -> Option<Arc<City>> {
        self.cities.iter().find(|c| c.name == name).cloned()
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
