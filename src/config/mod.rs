//! Configuration loading and parsing.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use navigator::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("navigator.yml"), "simulation:\n  tick_ms: 10\n").unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert_eq!(config.simulation.tick_ms, 10);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>` if given
//! 2. `navigator.yml` in the working directory
//! 3. Built-in defaults
//!
//! Command-line flags override values from the file.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{MapSettings, NavConfig, SimulationSettings, DEFAULT_DATA_FILE};
