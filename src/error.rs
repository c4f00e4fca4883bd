//! Error types for navigator operations.
//!
//! This module defines [`NavError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `NavError` for domain errors the operator can act on
//! - Use `anyhow::Error` (via `NavError::Other`) for unexpected errors
//! - Messages name the offending file, city or vehicle

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for navigator operations.
#[derive(Debug, Error)]
pub enum NavError {
    /// City data file is missing or cannot be read.
    #[error("Data file not found or not readable: {path}")]
    DataFileNotFound { path: PathBuf },

    /// A record in the city data file is malformed.
    #[error("Invalid data in {path} at line {line}: {message}")]
    DataFile {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// A city references a country that was never registered.
    #[error("Unknown country: {name}")]
    UnknownCountry { name: String },

    /// No city matches the given name or search term.
    #[error("Unknown city: {name}")]
    UnknownCity { name: String },

    /// Latitude or longitude is not a number.
    #[error("Invalid coordinate for city '{city}': {value}")]
    InvalidCoordinate { city: String, value: String },

    /// Vehicle specification could not be parsed.
    #[error("Invalid vehicle '{spec}': {message}")]
    InvalidVehicle { spec: String, message: String },

    /// The vehicle cannot complete the trip.
    #[error("{vehicle} cannot complete the trip {trip}")]
    ImpossibleTrip { trip: String, vehicle: String },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A prompt was needed but no terminal is attached.
    #[error("Cannot prompt for '{key}' in non-interactive mode")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for navigator operations.
pub type Result<T> = std::result::Result<T, NavError>;
