//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! dispatched via [`CommandDispatcher`].

pub mod cities;
pub mod completions;
pub mod dispatcher;
pub mod fastest;
pub mod interactive;
pub mod map;
pub mod route;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::atlas::Atlas;
use crate::error::Result;
use crate::trip::Trip;

/// Resolve each search term to a city and build a trip from them.
pub(crate) fn resolve_trip(atlas: &Atlas, terms: &[String]) -> Result<Trip> {
    let cities = terms
        .iter()
        .map(|term| atlas.resolve(term))
        .collect::<Result<Vec<_>>>()?;
    Trip::from_cities(cities).ok_or_else(|| anyhow::anyhow!("A trip needs at least one city").into())
}
