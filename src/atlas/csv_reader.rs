//! Loading an atlas from a world cities CSV file.
//!
//! The file must have a header row naming at least `city_ascii`, `lat`,
//! `lng`, `country`, `iso3`, `capital` and `id`. Other columns are ignored.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::Atlas;
use crate::error::{NavError, Result};

#[derive(Debug, Deserialize)]
struct CityRecord {
    city_ascii: String,
    lat: String,
    lng: String,
    country: String,
    iso3: String,
    #[serde(default)]
    capital: String,
    id: String,
}

impl Atlas {
    /// Load an atlas from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns `DataFileNotFound` if the file cannot be opened and
    /// `DataFile` for malformed records.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|_| NavError::DataFileNotFound {
            path: path.to_path_buf(),
        })?;
        let atlas = Self::read_csv(file, path)?;
        tracing::info!(
            "Loaded {} cities in {} countries from {}",
            atlas.len(),
            atlas.countries().len(),
            path.display()
        );
        Ok(atlas)
    }

    /// Load an atlas from any CSV source.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        Self::read_csv(reader, Path::new("<input>"))
    }

    fn read_csv<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let data_error = |line: u64, message: String| NavError::DataFile {
            path: origin.to_path_buf(),
            line,
            message,
        };

        let mut csv = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers = csv
            .headers()
            .map_err(|e| data_error(1, e.to_string()))?
            .clone();
        let mut atlas = Atlas::new();

        for row in csv.records() {
            let row = row.map_err(|e| {
                data_error(e.position().map(|p| p.line()).unwrap_or(0), e.to_string())
            })?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let record: CityRecord = row
                .deserialize(Some(&headers))
                .map_err(|e| data_error(line, e.to_string()))?;

            atlas.add_country(&record.country, &record.iso3);
            atlas
                .add_city(
                    &record.city_ascii,
                    &record.lat,
                    &record.lng,
                    &record.country,
                    &record.capital,
                    &record.id,
                )
                .map_err(|e| data_error(line, e.to_string()))?;
        }

        Ok(atlas)
    }
}
