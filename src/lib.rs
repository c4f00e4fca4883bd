//! Navigator - plan, route and simulate trips between world cities.
//!
//! Cities are loaded from a world cities CSV file into an [`atlas::Atlas`].
//! Vehicles decide how long a direct trip between two cities takes, trips
//! chain cities together, and [`routing`] finds the fastest chain a vehicle
//! can actually travel.
//!
//! # Modules
//!
//! - [`atlas`] - Countries, cities and CSV loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and parsing
//! - [`error`] - Error types and result aliases
//! - [`map`] - SVG map export
//! - [`menus`] - Interactive menus
//! - [`routing`] - Shortest path search
//! - [`simulation`] - Trip playback
//! - [`system`] - Vehicles and trips the operator works with
//! - [`trip`] - Ordered city sequences
//! - [`ui`] - Prompts and terminal output
//! - [`vehicle`] - Vehicle kinds and travel times
//!
//! # Example
//!
//! ```
//! use navigator::atlas::Atlas;
//! use navigator::routing::find_shortest_path;
//! use navigator::vehicle::Vehicle;
//!
//! let atlas = Atlas::example();
//! let car = Vehicle::CrappyCrepeCar { speed: 200 };
//! let melbourne = atlas.resolve("Melbourne").unwrap();
//! let sydney = atlas.resolve("Sydney").unwrap();
//!
//! let trip = find_shortest_path(&atlas, &car, &melbourne, &sydney).unwrap();
//! assert_eq!(trip.departure().name, "Melbourne");
//! assert_eq!(trip.arrival().name, "Sydney");
//! ```

pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod map;
pub mod menus;
pub mod routing;
pub mod simulation;
pub mod system;
pub mod trip;
pub mod ui;
pub mod vehicle;

pub use error::{NavError, Result};
